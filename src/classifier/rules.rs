use log::{debug, info};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::email::MessageMetadata;
use crate::error::RuleError;
use super::defaults;
use super::verdict::{Classification, RuleMatch};

/// Part of the message a keyword is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordField {
    Subject,
    /// Address part before `@`
    SenderLocal,
    /// Address part after `@`
    SenderDomain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordDefinition {
    pub value: String,
    pub field: KeywordField,
}

/// Serialized form of a rule set (the JSON rules file)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesDefinition {
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<KeywordDefinition>,
}

impl RulesDefinition {
    pub fn builtin() -> Self {
        RulesDefinition {
            patterns: defaults::SUBJECT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            keywords: defaults::KEYWORDS
                .iter()
                .map(|(value, field)| KeywordDefinition {
                    value: value.to_string(),
                    field: *field,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct PatternRule {
    regex: Regex,
    label: String,
}

#[derive(Debug, Clone)]
struct KeywordRule {
    needle: String,
    field: KeywordField,
}

/// Compiled, ordered classification rules.
///
/// Subject patterns are tried first, then keywords; the first match decides.
/// A message no rule matches is kept.
#[derive(Debug, Clone)]
pub struct RuleSet {
    patterns: Vec<PatternRule>,
    keywords: Vec<KeywordRule>,
}

impl RuleSet {
    pub fn from_definition(definition: &RulesDefinition) -> Result<Self, RuleError> {
        let mut patterns = Vec::with_capacity(definition.patterns.len());
        for pattern in &definition.patterns {
            if pattern.trim().is_empty() {
                return Err(RuleError::Empty("pattern"));
            }
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| RuleError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            patterns.push(PatternRule {
                regex,
                label: pattern.clone(),
            });
        }

        let mut keywords = Vec::with_capacity(definition.keywords.len());
        for keyword in &definition.keywords {
            let needle = keyword.value.trim().to_lowercase();
            if needle.is_empty() {
                return Err(RuleError::Empty("keyword"));
            }
            keywords.push(KeywordRule {
                needle,
                field: keyword.field,
            });
        }

        Ok(RuleSet { patterns, keywords })
    }

    pub fn builtin() -> Result<Self, RuleError> {
        Self::from_definition(&RulesDefinition::builtin())
    }

    /// Load a JSON rules file, replacing the built-in lists entirely
    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: display.clone(),
            source,
        })?;
        let definition: RulesDefinition =
            serde_json::from_str(&content).map_err(|source| RuleError::Format {
                path: display.clone(),
                source,
            })?;

        let rules = Self::from_definition(&definition)?;
        info!(
            "Loaded {} pattern(s) and {} keyword(s) from {}",
            rules.pattern_count(),
            rules.keyword_count(),
            display
        );
        Ok(rules)
    }

    pub fn to_definition(&self) -> RulesDefinition {
        RulesDefinition {
            patterns: self.patterns.iter().map(|p| p.label.clone()).collect(),
            keywords: self
                .keywords
                .iter()
                .map(|k| KeywordDefinition {
                    value: k.needle.clone(),
                    field: k.field,
                })
                .collect(),
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn classify(&self, message: &MessageMetadata) -> Classification {
        if let Some(rule) = self.patterns.iter().find(|rule| rule.regex.is_match(&message.subject)) {
            debug!("Subject '{}' matched pattern '{}'", message.subject, rule.label);
            return Classification::Delete(RuleMatch::pattern(rule.label.clone()));
        }

        let subject = message.subject.to_lowercase();
        let local = message.sender_local_part();
        let domain = message.sender_domain();

        for rule in &self.keywords {
            let haystack = match rule.field {
                KeywordField::Subject => &subject,
                KeywordField::SenderLocal => &local,
                KeywordField::SenderDomain => &domain,
            };
            if haystack.contains(&rule.needle) {
                debug!("Message from '{}' matched keyword '{}'", message.sender, rule.needle);
                return Classification::Delete(RuleMatch::keyword(rule.needle.clone()));
            }
        }

        Classification::Keep
    }
}
