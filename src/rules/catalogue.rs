//! Rule definitions and the frozen catalogue they live in

use once_cell::sync::Lazy;

use crate::error::MalformedResourceError;
use crate::models::{ControlSet, ResourceGraph, ResourceNode, ResourceType, RuleLevel};
use crate::resolver::ReferenceResolver;
use crate::rules::{dynamodb_autoscaling, dynamodb_backup_plan, dynamodb_pitr};

/// Rule id prefix of the NIST 800-53 Rev. 5 pack
pub const NIST_800_53_R5_PREFIX: &str = "NIST.800.53.R5";

/// Decides compliance of one resource
///
/// `Ok(false)` is the ordinary non-compliant answer. `Err` means a resource the
/// decision depends on is structurally invalid. Panics are catalogue bugs and
/// are left to propagate.
pub type Predicate =
    fn(&ResourceNode, &ResourceGraph, &ReferenceResolver) -> Result<bool, MalformedResourceError>;

/// Checks that a related resource is well formed enough to act as evidence
pub type Validator =
    fn(&ResourceNode, &ResourceGraph, &ReferenceResolver) -> Result<(), MalformedResourceError>;

/// Resources of another type a rule draws its evidence from
///
/// Evidence that fails validation is reported once, against its own logical
/// id, and contributes no relation to the rule's predicate.
#[derive(Clone)]
pub struct Evidence {
    pub resource_type: ResourceType,
    pub validate: Validator,
}

/// A compliance rule: trigger type, predicate and the text reported on failure
#[derive(Clone)]
pub struct Rule {
    id: String,
    pub name: &'static str,
    pub trigger: ResourceType,
    pub level: RuleLevel,
    pub info: &'static str,
    pub explanation: &'static str,
    pub controls: ControlSet,
    pub predicate: Predicate,
    pub evidence: Option<Evidence>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("level", &self.level)
            .field("evidence", &self.evidence.as_ref().map(|e| &e.resource_type))
            .finish_non_exhaustive()
    }
}

impl Rule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prefix: &str,
        name: &'static str,
        trigger: ResourceType,
        level: RuleLevel,
        info: &'static str,
        explanation: &'static str,
        controls: ControlSet,
        predicate: Predicate,
    ) -> Self {
        Self {
            id: format!("{}-{}", prefix, name),
            name,
            trigger,
            level,
            info,
            explanation,
            controls,
            predicate,
            evidence: None,
        }
    }

    /// Validate resources of `resource_type` as evidence for this rule
    pub fn with_evidence(mut self, resource_type: ResourceType, validate: Validator) -> Self {
        self.evidence = Some(Evidence {
            resource_type,
            validate,
        });
        self
    }

    /// Does the rule look at resources of this type, as trigger or as evidence?
    pub fn applies_to(&self, resource_type: &ResourceType) -> bool {
        &self.trigger == resource_type
            || self
                .evidence
                .as_ref()
                .map_or(false, |e| &e.resource_type == resource_type)
    }

    /// `<prefix>-<RuleName>`
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `<id>: <info> - (Control IDs: ...)`, with the explanation appended when verbose
    pub fn message(&self, verbose: bool) -> String {
        let message = format!("{}: {} - {}", self.id, self.info, self.controls.describe());
        if verbose {
            format!("{} {}", message, self.explanation)
        } else {
            message
        }
    }

    /// Run the predicate on a trigger resource, or validation on an evidence resource
    ///
    /// Evidence that validates counts as compliant: the finding for the
    /// triggering resource comes from the predicate.
    pub fn check(
        &self,
        node: &ResourceNode,
        graph: &ResourceGraph,
        resolver: &ReferenceResolver,
    ) -> Result<bool, MalformedResourceError> {
        if node.resource_type() == &self.trigger {
            return (self.predicate)(node, graph, resolver);
        }
        match &self.evidence {
            Some(evidence) if node.resource_type() == &evidence.resource_type => {
                (evidence.validate)(node, graph, resolver).map(|()| true)
            }
            _ => Ok(true),
        }
    }
}

/// Ordered set of rules
///
/// Built once; afterwards only shared references are handed out, so the
/// catalogue cannot change while evaluations run.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalogue {
    rules: Vec<Rule>,
}

impl RuleCatalogue {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; later rules run after earlier ones on the same resource
    ///
    /// A rule whose id is already present replaces nothing and is ignored.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        if self.get(rule.id()).is_none() {
            self.rules.push(rule);
        }
        self
    }

    /// NIST 800-53 Rev. 5 DynamoDB checks
    pub fn nist_800_53_r5() -> Self {
        Self::new()
            .with_rule(dynamodb_autoscaling::rule(NIST_800_53_R5_PREFIX))
            .with_rule(dynamodb_backup_plan::rule(NIST_800_53_R5_PREFIX))
            .with_rule(dynamodb_pitr::rule(NIST_800_53_R5_PREFIX))
    }

    /// Rules triggered by `resource_type`, in declaration order
    pub fn rules_for<'a>(&'a self, resource_type: &'a ResourceType) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| &rule.trigger == resource_type)
    }

    /// Rules that trigger on or draw evidence from `resource_type`, in declaration order
    pub fn rules_applying_to<'a>(
        &'a self,
        resource_type: &'a ResourceType,
    ) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.applies_to(resource_type))
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The process-wide NIST 800-53 R5 catalogue
pub static NIST_800_53_R5: Lazy<RuleCatalogue> = Lazy::new(RuleCatalogue::nist_800_53_r5);
