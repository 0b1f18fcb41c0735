pub mod map;
pub mod rules;

pub use map::GroupMap;
pub use rules::RuleClassifier;

/// Resolved group of a variable. `Unknown` never shares a group with
/// anything, another `Unknown` included.
#[derive(Debug, Clone)]
pub enum VarGroup {
    Known(String),
    Unknown,
}

impl VarGroup {
    pub fn label(&self) -> Option<&str> {
        match self {
            VarGroup::Known(label) => Some(label),
            VarGroup::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, VarGroup::Known(_))
    }

    pub fn shares_group(&self, other: &VarGroup) -> bool {
        match (self, other) {
            (VarGroup::Known(a), VarGroup::Known(b)) => a == b,
            _ => false,
        }
    }
}

pub trait Classifier {
    fn classify(&self, name: &str) -> VarGroup;

    /// Variables the classifier was built from, in declaration order. Rule
    /// based classifiers have no finite domain and return `None`.
    fn declared_variables(&self) -> Option<&[String]> {
        None
    }

    fn describe(&self) -> String;
}

#[cfg(test)]
#[path = "../../tests/src_inline/groups/tests.rs"]
mod tests;
