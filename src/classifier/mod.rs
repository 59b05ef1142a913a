/// Rule-based classification of messages into delete / keep
pub mod defaults;
pub mod rules;
pub mod verdict;

pub use rules::{KeywordDefinition, KeywordField, RuleSet, RulesDefinition};
pub use verdict::{Classification, RuleKind, RuleMatch};
