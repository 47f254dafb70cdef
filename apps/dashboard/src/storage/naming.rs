//! File naming for stored photos and generated reports.
//!
//! Every name produced here is a single flat path segment made of
//! alphanumerics plus `._-`, so it can be joined onto a storage root without
//! escaping it. Photo names are ASCII only; report names keep non-Latin
//! letters so distinct student names stay distinct on disk.

use std::str::FromStr;

use uuid::Uuid;

const REPORT_SUFFIX: &str = "_report.pdf";
const FALLBACK_COMPONENT: &str = "upload";

/// How report PDFs are named on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportNaming {
    /// `{name}_report.pdf`. A later submission under the same name replaces the earlier file.
    #[default]
    ByName,
    /// `{uuid}_{name}_report.pdf`.
    Unique,
}

impl FromStr for ReportNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by_name" | "by-name" | "name" => Ok(ReportNaming::ByName),
            "unique" | "uuid" => Ok(ReportNaming::Unique),
            other => Err(format!(
                "unknown report naming '{other}' (expected 'by_name' or 'unique')"
            )),
        }
    }
}

/// Storage name for an uploaded photo: a random v4 UUID, `_`, then the sanitized original name.
pub fn photo_file_name(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_component(original))
}

/// Storage name for a student's PDF report.
pub fn report_file_name(student_name: &str, naming: ReportNaming) -> String {
    let base = report_component(student_name);
    match naming {
        ReportNaming::ByName => format!("{base}{REPORT_SUFFIX}"),
        ReportNaming::Unique => format!("{}_{base}{REPORT_SUFFIX}", Uuid::new_v4()),
    }
}

/// Reduces arbitrary client text to a safe single path segment.
///
/// Only the final `/` or `\` separated segment is kept, every character outside
/// `[A-Za-z0-9._-]` (whitespace included) becomes `_`, and leading dots are dropped.
pub fn sanitize_component(raw: &str) -> String {
    let last_segment = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last_segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_COMPONENT.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Like [`sanitize_component`] but for display names: nothing is cut at path
/// separators, and Unicode letters and digits survive.
fn report_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_COMPONENT.to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '-' | '_')
}

/// True when `name` could have been produced by this module.
/// Used to reject lookups that try to escape the storage root.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name.chars().all(is_name_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_photo_names_never_repeat() {
        let names: HashSet<String> = (0..500).map(|_| photo_file_name("me.jpg")).collect();
        assert_eq!(names.len(), 500);
    }

    #[test]
    fn test_photo_name_keeps_original_suffix() {
        let name = photo_file_name("portrait.png");
        let (prefix, rest) = name.split_once('_').unwrap();
        assert!(Uuid::parse_str(prefix).is_ok(), "prefix was {prefix}");
        assert_eq!(rest, "portrait.png");
    }

    #[test]
    fn test_photo_name_strips_traversal() {
        let name = photo_file_name("../../etc/passwd");
        assert!(name.ends_with("_passwd"));
        assert!(is_safe_file_name(&name));

        let windows = photo_file_name("C:\\Users\\me\\face.jpg");
        assert!(windows.ends_with("_face.jpg"));
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_component("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_component(".hidden"), "hidden");
        assert_eq!(sanitize_component(""), "upload");
        assert_eq!(sanitize_component(".."), "upload");
    }

    #[test]
    fn test_report_name_by_name_replaces_spaces() {
        assert_eq!(
            report_file_name("Ravi Kumar", ReportNaming::ByName),
            "Ravi_Kumar_report.pdf"
        );
        assert_eq!(
            report_file_name("Ravi Kumar", ReportNaming::ByName),
            report_file_name("Ravi Kumar", ReportNaming::ByName)
        );
    }

    #[test]
    fn test_report_name_keeps_non_latin_names_apart() {
        let ram = report_file_name("राम", ReportNaming::ByName);
        let amar = report_file_name("अमर", ReportNaming::ByName);
        assert_ne!(ram, amar);
        assert_eq!(ram, "राम_report.pdf");
        assert!(is_safe_file_name(&ram));

        assert_ne!(
            report_file_name("José", ReportNaming::ByName),
            report_file_name("Josè", ReportNaming::ByName)
        );
    }

    #[test]
    fn test_report_name_keeps_text_around_separators() {
        let name = report_file_name("Ravi/Kumar", ReportNaming::ByName);
        assert_eq!(name, "Ravi_Kumar_report.pdf");
        assert_ne!(name, report_file_name("Kumar", ReportNaming::ByName));
        assert_eq!(
            report_file_name("..\\evil", ReportNaming::ByName),
            "_evil_report.pdf"
        );
    }

    #[test]
    fn test_report_name_unique_keeps_readable_part() {
        let a = report_file_name("Ravi Kumar", ReportNaming::Unique);
        let b = report_file_name("Ravi Kumar", ReportNaming::Unique);
        assert_ne!(a, b);
        assert!(a.ends_with("_Ravi_Kumar_report.pdf"));
    }

    #[test]
    fn test_report_naming_from_str() {
        assert_eq!("unique".parse::<ReportNaming>(), Ok(ReportNaming::Unique));
        assert_eq!(" BY_NAME ".parse::<ReportNaming>(), Ok(ReportNaming::ByName));
        assert!("random".parse::<ReportNaming>().is_err());
    }

    #[test]
    fn test_is_safe_file_name() {
        assert!(is_safe_file_name("abc_report.pdf"));
        assert!(is_safe_file_name("अमर_report.pdf"));
        assert!(!is_safe_file_name("../secret"));
        assert!(!is_safe_file_name("a/b.pdf"));
        assert!(!is_safe_file_name(".env"));
        assert!(!is_safe_file_name(""));
    }
}
