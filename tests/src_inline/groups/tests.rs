use super::rules::{AA_COMPOSITION, builtin_rules};
use super::{Classifier, GroupMap, RuleClassifier, VarGroup};

#[test]
fn test_single_letter_is_amino_acid() {
    let c = RuleClassifier::builtin();
    for name in ["A", "C", "W", "e"] {
        assert_eq!(c.classify(name).label(), Some(AA_COMPOSITION));
    }
}

#[test]
fn test_builtin_rule_matches() {
    let c = RuleClassifier::builtin();
    assert_eq!(c.classify("degree.centrality").label(), Some("Network centrality"));
    assert_eq!(c.classify("chromosome").label(), Some("Location"));
    assert_eq!(c.classify("CAI").label(), Some("Codon bias"));
    assert_eq!(c.classify("sum.mRNA.cpc").label(), Some("Expression"));
    assert_eq!(c.classify("essential").label(), Some("Functional importance"));
    assert_eq!(c.classify("genelength").label(), Some("Size"));
}

#[test]
fn test_first_matching_rule_wins() {
    let c = RuleClassifier::builtin();
    assert_eq!(c.classify("Mass..kDa.start").label(), Some("Size"));
    assert_eq!(c.classify("Extended").label(), Some("Location"));
    let first = builtin_rules()
        .iter()
        .position(|r| r.pattern == "Mass..kDa")
        .unwrap();
    let later = builtin_rules()
        .iter()
        .position(|r| r.pattern == "start")
        .unwrap();
    assert!(first < later);
}

#[test]
fn test_unmatched_name_is_unknown() {
    let c = RuleClassifier::builtin();
    assert!(!c.classify("mystery").is_known());
    assert!(c.declared_variables().is_none());
}

#[test]
fn test_unknown_never_shares_group() {
    let a = VarGroup::Unknown;
    let b = VarGroup::Unknown;
    let k = VarGroup::Known("Size".to_string());
    assert!(!a.shares_group(&b));
    assert!(!a.shares_group(&a));
    assert!(!k.shares_group(&a));
    assert!(!a.shares_group(&k));
    assert!(k.shares_group(&VarGroup::Known("Size".to_string())));
    assert!(!k.shares_group(&VarGroup::Known("Charge".to_string())));
}

#[test]
fn test_group_map_exact_lookup() {
    let map: GroupMap = [("CAI", "Codon bias"), ("pI", "Charge")]
        .into_iter()
        .collect();
    assert_eq!(map.classify("CAI").label(), Some("Codon bias"));
    assert!(!map.classify("CAI.2").is_known());
    assert!(!map.classify("A").is_known());
    assert_eq!(
        map.declared_variables().unwrap(),
        &["CAI".to_string(), "pI".to_string()]
    );
}

#[test]
fn test_group_map_keeps_first_duplicate() {
    let mut map = GroupMap::new();
    assert!(map.insert("x".to_string(), "A".to_string()));
    assert!(!map.insert("x".to_string(), "B".to_string()));
    assert_eq!(map.get("x"), Some("A"));
    assert_eq!(map.len(), 1);
}
