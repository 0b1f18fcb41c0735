use crate::groups::{Classifier, VarGroup};

#[derive(Debug, Clone, Copy)]
pub struct GroupRule {
    pub pattern: &'static str,
    pub group: &'static str,
}

const fn rule(pattern: &'static str, group: &'static str) -> GroupRule {
    GroupRule { pattern, group }
}

pub const AA_COMPOSITION: &str = "AA composition";

// First match wins. "Mass..kDa.start" is Size, not Location, and any name
// containing "end" (e.g. "Extended") lands in Location.
const BUILTIN_RULES: &[GroupRule] = &[
    rule("centr", "Network centrality"),
    rule("Function", "Function"),
    rule("Process", "Process"),
    rule("Component", "Component"),
    rule("chr", "Location"),
    rule("CAI", "Codon bias"),
    rule("Residues", "Size"),
    rule("Charge", "Charge"),
    rule("pI", "Charge"),
    rule("Mass..kDa", "Size"),
    rule("sum.protein.cpc", "Expression"),
    rule("sum.mRNA.cpc", "Expression"),
    rule("log.phase.RPKM", "Expression"),
    rule("solid.med.fitness", "Functional importance"),
    rule("essential", "Functional importance"),
    rule("genelength", "Size"),
    rule("start", "Location"),
    rule("end", "Location"),
];

pub fn builtin_rules() -> &'static [GroupRule] {
    BUILTIN_RULES
}

/// Substring classifier over an ordered rule list.
#[derive(Debug, Clone, Copy)]
pub struct RuleClassifier {
    rules: &'static [GroupRule],
}

impl RuleClassifier {
    pub fn builtin() -> Self {
        Self::with_rules(builtin_rules())
    }

    pub fn with_rules(rules: &'static [GroupRule]) -> Self {
        Self { rules }
    }
}

impl Classifier for RuleClassifier {
    fn classify(&self, name: &str) -> VarGroup {
        // Single letters are amino acid codes.
        if name.chars().count() == 1 {
            return VarGroup::Known(AA_COMPOSITION.to_string());
        }
        self.rules
            .iter()
            .find(|rule| name.contains(rule.pattern))
            .map(|rule| VarGroup::Known(rule.group.to_string()))
            .unwrap_or(VarGroup::Unknown)
    }

    fn describe(&self) -> String {
        format!("builtin rules ({} patterns)", self.rules.len())
    }
}
