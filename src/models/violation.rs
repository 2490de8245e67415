use serde::{Deserialize, Serialize};

use crate::error::MalformedResourceError;

/// How loudly a rule reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Error,
    Warning,
}

impl RuleLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleLevel::Error => "error",
            RuleLevel::Warning => "warning",
        }
    }
}

/// Why a finding was raised
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// The rule's predicate returned false
    NonCompliant,
    /// The rule could not be decided because a resource was structurally invalid
    Malformed,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::NonCompliant => "non_compliant",
            FindingKind::Malformed => "malformed",
        }
    }
}

/// A failed (resource, rule) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    pub rule_id: String,
    pub resource_id: String,
    pub message: String,
    pub level: RuleLevel,
    pub kind: FindingKind,
}

impl Violation {
    pub fn new(rule_id: &str, resource_id: &str, message: String, level: RuleLevel) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            resource_id: resource_id.to_string(),
            message,
            level,
            kind: FindingKind::NonCompliant,
        }
    }

    /// Finding for a rule that could not be evaluated against `resource_id`
    ///
    /// The message keeps the rule id prefix so reporters matching on
    /// `"<rule id>:"` still see it, followed by the malformed resource.
    pub fn malformed(
        rule_id: &str,
        resource_id: &str,
        error: &MalformedResourceError,
        level: RuleLevel,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            resource_id: resource_id.to_string(),
            message: format!("{}: Malformed resource - {}", rule_id, error),
            level,
            kind: FindingKind::Malformed,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == FindingKind::Malformed
    }
}

/// A finding that would have been reported but was acknowledged on the resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuppressedFinding {
    pub rule_id: String,
    pub resource_id: String,
    pub reason: String,
}
