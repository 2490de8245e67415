//! Evaluation engine
//!
//! Walks a stack once, applies the rule catalogue and collects findings.

pub mod evaluator;
pub mod sink;

pub use evaluator::Evaluator;
pub use sink::{EvaluationReport, ViolationSink};
