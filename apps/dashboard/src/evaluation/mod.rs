// Rule-based evaluation of a student's attendance and marks.
// Pure functions only; no I/O happens in this module.

pub mod classifier;

pub use classifier::{classify, Evaluation, Outcome, RiskTier};
