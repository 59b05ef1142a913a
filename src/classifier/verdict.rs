use std::fmt;

/// Rule family that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Pattern,
    Keyword,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Pattern => write!(f, "pattern"),
            RuleKind::Keyword => write!(f, "keyword"),
        }
    }
}

/// The rule that matched, as shown in reports: `pattern: newsletter`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleMatch {
    pub kind: RuleKind,
    pub value: String,
}

impl RuleMatch {
    pub fn pattern(value: impl Into<String>) -> Self {
        Self { kind: RuleKind::Pattern, value: value.into() }
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        Self { kind: RuleKind::Keyword, value: value.into() }
    }
}

impl fmt::Display for RuleMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}

/// Verdict for one message. A deletion always carries the rule behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Delete(RuleMatch),
    Keep,
}

impl Classification {
    pub fn is_delete(&self) -> bool {
        matches!(self, Classification::Delete(_))
    }

    pub fn rule(&self) -> Option<&RuleMatch> {
        match self {
            Classification::Delete(rule) => Some(rule),
            Classification::Keep => None,
        }
    }
}
