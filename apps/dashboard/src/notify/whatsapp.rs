//! `wa.me` click-to-chat links carrying a pre-filled report notification.

use crate::evaluation::{Outcome, RiskTier};

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Notification text sent to the student.
pub fn report_message(name: &str, branch: &str, outcome: Outcome, risk: RiskTier) -> String {
    format!(
        "Hello {name},\n\
         \n\
         Your Student Performance Report is ready.\n\
         \n\
         Branch: {branch}\n\
         Result: {outcome}\n\
         Risk Level: {risk}\n\
         \n\
         Please download your full report from the system.\n\
         \n\
         Regards,\n\
         AI Student Dashboard\n"
    )
}

/// Builds `https://wa.me/{country_code}{phone}?text={escaped message}`.
///
/// The phone number is used verbatim after the country code; its digits are not checked.
pub fn build_deep_link(
    country_code: &str,
    phone: &str,
    name: &str,
    branch: &str,
    outcome: Outcome,
    risk: RiskTier,
) -> String {
    let message = report_message(name, branch, outcome, risk);
    format!(
        "{WHATSAPP_BASE_URL}/{country_code}{phone}?text={}",
        urlencoding::encode(&message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASHA_MESSAGE: &str = "Hello Asha,

Your Student Performance Report is ready.

Branch: CSE
Result: Pass
Risk Level: Low Risk

Please download your full report from the system.

Regards,
AI Student Dashboard
";

    #[test]
    fn test_message_matches_template() {
        assert_eq!(
            report_message("Asha", "CSE", Outcome::Pass, RiskTier::Low),
            ASHA_MESSAGE
        );
    }

    #[test]
    fn test_link_decodes_to_template() {
        let link = build_deep_link("91", "9876543210", "Asha", "CSE", Outcome::Pass, RiskTier::Low);
        let (prefix, encoded) = link.split_once("?text=").unwrap();
        assert_eq!(prefix, "https://wa.me/919876543210");
        assert_eq!(urlencoding::decode(encoded).unwrap(), ASHA_MESSAGE);
    }

    #[test]
    fn test_text_is_fully_escaped() {
        let link = build_deep_link("91", "1", "A&B = C?", "CSE #1", Outcome::Fail, RiskTier::High);
        let query = link.split_once("?text=").unwrap().1;
        for forbidden in ['&', '=', '?', '#', ' ', '\n'] {
            assert!(!query.contains(forbidden), "unescaped {forbidden:?} in {query}");
        }
    }

    #[test]
    fn test_country_code_is_configurable() {
        let link = build_deep_link("44", "7700900123", "Asha", "CSE", Outcome::Pass, RiskTier::Low);
        assert!(link.starts_with("https://wa.me/447700900123?text="));
    }
}
