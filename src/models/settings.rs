use serde::{Deserialize, Serialize};

/// Engine configuration
///
/// Read once before evaluation starts; the evaluator only ever borrows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Append each rule's explanation to its violation message
    #[serde(default)]
    pub verbose: bool,
    /// Rule ids the evaluator should skip entirely
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    /// Surface suppressed findings to the reporter instead of only logging them
    #[serde(default)]
    pub report_suppressed: bool,
}

impl Settings {
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self.disabled_rules.iter().any(|id| id == rule_id)
    }

    pub fn with_disabled_rule(mut self, rule_id: &str) -> Self {
        self.disabled_rules.push(rule_id.to_string());
        self
    }
}
