use serde::{Deserialize, Serialize};

use crate::models::{RuleLevel, SuppressedFinding, Violation};

/// Findings of one evaluation run, in the order they were produced
///
/// Append-only while the run is in progress; read-only once handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationSink {
    violations: Vec<Violation>,
    suppressed: Vec<SuppressedFinding>,
}

impl ViolationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub(crate) fn push_suppressed(&mut self, finding: SuppressedFinding) {
        self.suppressed.push(finding);
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn suppressed(&self) -> &[SuppressedFinding] {
        &self.suppressed
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.level == RuleLevel::Error)
    }

    /// Violations raised by one rule
    pub fn for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.rule_id == rule_id)
    }

    /// Violations raised against one resource
    pub fn for_resource<'a>(&'a self, resource_id: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.resource_id == resource_id)
    }
}

/// Serializable summary handed to reporters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReport {
    pub stack: String,
    pub generated_at: String,
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<SuppressedFinding>,
}

impl EvaluationReport {
    pub fn new(stack: &str, sink: ViolationSink, include_suppressed: bool) -> Self {
        let ViolationSink {
            violations,
            suppressed,
        } = sink;
        Self {
            stack: stack.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            violations,
            suppressed: if include_suppressed { suppressed } else { Vec::new() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule: &str, resource: &str, level: RuleLevel) -> Violation {
        Violation::new(rule, resource, format!("{}: test", rule), level)
    }

    #[test]
    fn test_sink_preserves_order() {
        let mut sink = ViolationSink::new();
        sink.push(violation("R-2", "b", RuleLevel::Error));
        sink.push(violation("R-1", "a", RuleLevel::Error));

        let rules: Vec<&str> = sink.violations().iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(rules, vec!["R-2", "R-1"]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_filters() {
        let mut sink = ViolationSink::new();
        sink.push(violation("R-1", "a", RuleLevel::Error));
        sink.push(violation("R-2", "a", RuleLevel::Warning));
        sink.push(violation("R-1", "b", RuleLevel::Error));

        assert_eq!(sink.for_rule("R-1").count(), 2);
        assert_eq!(sink.for_resource("a").count(), 2);
        assert_eq!(sink.for_resource("c").count(), 0);
    }

    #[test]
    fn test_has_errors() {
        let mut sink = ViolationSink::new();
        assert!(!sink.has_errors());
        sink.push(violation("R-1", "a", RuleLevel::Warning));
        assert!(!sink.has_errors());
        sink.push(violation("R-2", "a", RuleLevel::Error));
        assert!(sink.has_errors());
    }

    #[test]
    fn test_report_suppressed_toggle() {
        let mut sink = ViolationSink::new();
        sink.push_suppressed(SuppressedFinding {
            rule_id: "R-1".to_string(),
            resource_id: "a".to_string(),
            reason: "accepted risk for test data".to_string(),
        });

        let hidden = EvaluationReport::new("stack", sink.clone(), false);
        assert!(hidden.suppressed.is_empty());
        let json = serde_json::to_string(&hidden).unwrap();
        assert!(!json.contains("suppressed"));

        let shown = EvaluationReport::new("stack", sink, true);
        assert_eq!(shown.suppressed.len(), 1);
        assert_eq!(shown.stack, "stack");
        assert!(!shown.generated_at.is_empty());
    }
}
