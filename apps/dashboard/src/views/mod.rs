//! HTML pages rendered from embedded templates.
//!
//! Placeholders look like `{{key}}` and are filled in a single pass, so text
//! supplied by the student can never introduce further substitutions.

use crate::evaluation::RiskTier;
use crate::submission::form::display_number;
use crate::submission::ResultView;

pub const FORM_PAGE: &str = include_str!("templates/index.html");
const RESULT_TEMPLATE: &str = include_str!("templates/result.html");

/// Renders the result page. Every value is HTML-escaped.
pub fn render_result(view: &ResultView) -> String {
    let risk_class = match view.evaluation.risk {
        RiskTier::High => "risk-high",
        RiskTier::Medium => "risk-medium",
        RiskTier::Low => "risk-low",
    };
    let whatsapp = view
        .whatsapp_link
        .as_deref()
        .map(|link| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener">Send via WhatsApp</a>"#,
                escape_html(link)
            )
        })
        .unwrap_or_default();

    let pdf_href = urlencoding::encode(&view.pdf_file);
    let values: [(&str, String); 16] = [
        ("name", escape_html(&view.name)),
        ("email", escape_html(&view.email)),
        ("roll", escape_html(&view.roll)),
        ("reg", escape_html(&view.reg)),
        ("semester", escape_html(&view.semester)),
        ("branch", escape_html(&view.branch)),
        ("subjects", escape_html(&view.subjects)),
        ("attendance", display_number(view.attendance)),
        ("marks", display_number(view.marks)),
        ("risk", escape_html(view.evaluation.risk.label())),
        ("risk_class", risk_class.to_string()),
        ("result", escape_html(view.evaluation.outcome.label())),
        ("suggestion", escape_html(view.evaluation.advisory)),
        ("photo_url", escape_html(&view.photo_url)),
        ("pdf_file", escape_html(&pdf_href)),
        ("whatsapp", whatsapp),
    ];
    fill(RESULT_TEMPLATE, &values)
}

fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
