//! Threshold classifier mapping (attendance, marks) to risk tier, outcome and advice.
//!
//! Thresholds use strict `<` comparisons, so boundary values (60, 75 and 40)
//! fall into the less severe bracket.

use std::fmt;

/// Attendance percentage below which a student is High Risk.
pub const HIGH_RISK_BELOW: f64 = 60.0;
/// Attendance percentage below which a student is Medium Risk.
pub const MEDIUM_RISK_BELOW: f64 = 75.0;
/// Marks below which the outcome is a Fail.
pub const PASS_MARK: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub fn from_attendance(attendance: f64) -> Self {
        if attendance < HIGH_RISK_BELOW {
            RiskTier::High
        } else if attendance < MEDIUM_RISK_BELOW {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::Low => "Low Risk",
        }
    }

    /// Fixed guidance text for this tier.
    pub fn advisory(self) -> &'static str {
        match self {
            RiskTier::High => "Increase attendance immediately and focus on weak subjects.",
            RiskTier::Medium => "Maintain consistency and improve performance.",
            RiskTier::Low => "Keep up the good work!",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn from_marks(marks: f64) -> Self {
        if marks < PASS_MARK {
            Outcome::Fail
        } else {
            Outcome::Pass
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "Pass",
            Outcome::Fail => "Fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable result of classifying one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub risk: RiskTier,
    pub outcome: Outcome,
    pub advisory: &'static str,
}

/// Classifies a student. Accepts any number, including values outside 0..=100.
pub fn classify(attendance: f64, marks: f64) -> Evaluation {
    let risk = RiskTier::from_attendance(attendance);
    Evaluation {
        risk,
        outcome: Outcome::from_marks(marks),
        advisory: risk.advisory(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_attendance_is_high_risk() {
        assert_eq!(classify(0.0, 80.0).risk, RiskTier::High);
        assert_eq!(classify(59.99, 80.0).risk, RiskTier::High);
    }

    #[test]
    fn test_sixty_is_medium_risk() {
        assert_eq!(classify(60.0, 80.0).risk, RiskTier::Medium);
        assert_eq!(classify(74.9, 80.0).risk, RiskTier::Medium);
    }

    #[test]
    fn test_seventy_five_is_low_risk() {
        assert_eq!(classify(75.0, 80.0).risk, RiskTier::Low);
        assert_eq!(classify(100.0, 80.0).risk, RiskTier::Low);
    }

    #[test]
    fn test_forty_marks_is_pass() {
        assert_eq!(classify(90.0, 40.0).outcome, Outcome::Pass);
        assert_eq!(classify(90.0, 39.5).outcome, Outcome::Fail);
    }

    #[test]
    fn test_advisory_ignores_outcome() {
        let passing = classify(50.0, 95.0);
        let failing = classify(50.0, 10.0);
        assert_eq!(passing.outcome, Outcome::Pass);
        assert_eq!(passing.advisory, failing.advisory);
        assert_eq!(
            passing.advisory,
            "Increase attendance immediately and focus on weak subjects."
        );
    }

    #[test]
    fn test_each_tier_has_its_own_advisory() {
        assert_eq!(
            classify(65.0, 50.0).advisory,
            "Maintain consistency and improve performance."
        );
        assert_eq!(classify(80.0, 50.0).advisory, "Keep up the good work!");
    }

    #[test]
    fn test_out_of_range_inputs_are_classified() {
        let e = classify(-5.0, 150.0);
        assert_eq!(e.risk, RiskTier::High);
        assert_eq!(e.outcome, Outcome::Pass);
        assert_eq!(classify(250.0, -1.0).risk, RiskTier::Low);
    }

    #[test]
    fn test_labels_display_as_page_text() {
        let e = classify(70.0, 20.0);
        assert_eq!(e.risk.to_string(), "Medium Risk");
        assert_eq!(e.outcome.to_string(), "Fail");
    }
}
