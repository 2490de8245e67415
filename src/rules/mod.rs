//! NIST 800-53 R5 rule engines
//! Decide compliance of individual resources, correlating related resources by name

pub mod catalogue;
pub mod dynamodb_autoscaling;
pub mod dynamodb_backup_plan;
pub mod dynamodb_pitr;

pub use catalogue::{
    Evidence, Predicate, Rule, RuleCatalogue, Validator, NIST_800_53_R5, NIST_800_53_R5_PREFIX,
};
