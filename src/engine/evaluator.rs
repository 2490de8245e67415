//! Single-pass rule evaluation over one stack

use tracing::{debug, info, warn};

use crate::engine::sink::ViolationSink;
use crate::models::{ResourceGraph, Settings, SuppressedFinding, Violation};
use crate::resolver::ReferenceResolver;
use crate::rules::RuleCatalogue;

/// Runs a catalogue against stacks
///
/// Holds only shared borrows: the catalogue, resolver and settings are never
/// modified, so one evaluator can check any number of stacks.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    catalogue: &'a RuleCatalogue,
    resolver: &'a ReferenceResolver,
    settings: &'a Settings,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalogue: &'a RuleCatalogue, resolver: &'a ReferenceResolver, settings: &'a Settings) -> Self {
        Self {
            catalogue,
            resolver,
            settings,
        }
    }

    /// Evaluate every triggered rule on every resource
    ///
    /// Resources are visited in declaration order and rules in catalogue
    /// order, so the same graph always yields the same sequence. Evidence
    /// resources are validated in the same walk. A malformed resource becomes
    /// a finding against its own id for the rule being checked, and the walk
    /// continues.
    pub fn evaluate(&self, graph: &ResourceGraph) -> ViolationSink {
        let mut sink = ViolationSink::new();

        for node in graph.all_resources(None) {
            for rule in self.catalogue.rules_applying_to(node.resource_type()) {
                if !self.settings.is_rule_enabled(rule.id()) {
                    continue;
                }

                let outcome = rule.check(node, graph, self.resolver);
                let violation = match outcome {
                    Ok(true) => continue,
                    Ok(false) => Violation::new(
                        rule.id(),
                        node.logical_id(),
                        rule.message(self.settings.verbose),
                        rule.level,
                    ),
                    Err(err) => {
                        warn!(
                            stack = graph.name(),
                            rule = rule.id(),
                            resource = node.logical_id(),
                            error = %err,
                            "Rule could not be decided"
                        );
                        Violation::malformed(rule.id(), node.logical_id(), &err, rule.level)
                    }
                };

                if let Some(suppression) = node.is_suppressed(rule.id()) {
                    debug!(
                        rule = rule.id(),
                        resource = node.logical_id(),
                        reason = %suppression.reason,
                        "Finding suppressed"
                    );
                    sink.push_suppressed(SuppressedFinding {
                        rule_id: violation.rule_id,
                        resource_id: violation.resource_id,
                        reason: suppression.reason.clone(),
                    });
                    continue;
                }

                debug!(rule = rule.id(), resource = node.logical_id(), "Violation");
                sink.push(violation);
            }
        }

        info!(
            stack = graph.name(),
            resources = graph.len(),
            violations = sink.len(),
            suppressed = sink.suppressed().len(),
            "Evaluation complete"
        );
        sink
    }

    /// Evaluate independent stacks one after another
    pub fn evaluate_stacks(&self, graphs: &[ResourceGraph]) -> Vec<ViolationSink> {
        graphs.iter().map(|graph| self.evaluate(graph)).collect()
    }
}
