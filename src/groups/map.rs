use std::collections::HashMap;

use crate::groups::{Classifier, VarGroup};

/// Explicit variable → group table. Lookups are exact.
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
    order: Vec<String>,
    groups: HashMap<String, String>,
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false and leaves the map unchanged when `var` is already
    /// present.
    pub fn insert(&mut self, var: String, group: String) -> bool {
        if self.groups.contains_key(&var) {
            return false;
        }
        self.order.push(var.clone());
        self.groups.insert(var, group);
        true
    }

    pub fn get(&self, var: &str) -> Option<&str> {
        self.groups.get(var).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<V: Into<String>, G: Into<String>> FromIterator<(V, G)> for GroupMap {
    fn from_iter<I: IntoIterator<Item = (V, G)>>(iter: I) -> Self {
        let mut map = GroupMap::new();
        for (var, group) in iter {
            map.insert(var.into(), group.into());
        }
        map
    }
}

impl Classifier for GroupMap {
    fn classify(&self, name: &str) -> VarGroup {
        match self.get(name) {
            Some(group) => VarGroup::Known(group.to_string()),
            None => VarGroup::Unknown,
        }
    }

    fn declared_variables(&self) -> Option<&[String]> {
        Some(&self.order)
    }

    fn describe(&self) -> String {
        let mut labels: Vec<&str> = self.groups.values().map(String::as_str).collect();
        labels.sort_unstable();
        labels.dedup();
        format!("group table ({} variables, {} groups)", self.len(), labels.len())
    }
}
