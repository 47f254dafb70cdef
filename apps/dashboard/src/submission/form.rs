//! Parse-and-validate step turning raw multipart fields into a typed [`Submission`].
//!
//! Nothing in this module touches the filesystem, so a rejected form never
//! leaves artifacts behind.

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;

use crate::errors::AppError;

pub const DEFAULT_BRANCH: &str = "Not Provided";

const REQUIRED_TEXT_FIELDS: [&str; 7] = [
    "name",
    "email",
    "roll",
    "reg",
    "semester",
    "attendance",
    "marks",
];

/// Uploaded file part as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub original_name: String,
    pub bytes: Bytes,
}

/// Form fields exactly as submitted. Text fields keep every value in arrival
/// order so repeatable fields (`subjects`) survive.
#[derive(Debug, Clone, Default)]
pub struct RawForm {
    pub text: HashMap<String, Vec<String>>,
    pub photo: Option<UploadedPhoto>,
}

impl RawForm {
    pub fn push_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.text.entry(key.into()).or_default().push(value.into());
    }

    /// First value of `key`, trimmed, or `None` when absent or blank.
    fn first(&self, key: &str) -> Option<&str> {
        self.text
            .get(key)
            .and_then(|values| values.first())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn all(&self, key: &str) -> impl Iterator<Item = &str> {
        self.text
            .get(key)
            .into_iter()
            .flatten()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Drains a multipart body. The `photo` part is buffered; every other part is read as text.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = RawForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Malformed form body", e))?
        {
            let Some(key) = field.name().map(str::to_string) else {
                continue;
            };

            if key == "photo" {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read photo", e))?;
                // Browsers send an empty part when no file was chosen
                if !bytes.is_empty() {
                    form.photo = Some(UploadedPhoto {
                        original_name,
                        bytes,
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&format!("Failed to read '{key}'"), e))?;
                form.push_text(key, value);
            }
        }

        Ok(form)
    }
}

/// Keeps axum's 413 for bodies over the upload limit; anything else is a client mistake.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    let message = format!("{context}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

/// A validated submission. Exists only for the duration of one request.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub roll: String,
    pub reg: String,
    pub semester: String,
    pub branch: String,
    pub subjects: Vec<String>,
    pub attendance: f64,
    pub marks: f64,
    pub photo: UploadedPhoto,
}

impl Submission {
    /// Validates `raw`, reporting every missing required field at once.
    pub fn parse(raw: RawForm) -> Result<Self, AppError> {
        let mut missing: Vec<&str> = REQUIRED_TEXT_FIELDS
            .iter()
            .copied()
            .filter(|key| raw.first(key).is_none())
            .collect();
        if raw.photo.is_none() {
            missing.push("photo");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let attendance = parse_number(&raw, "attendance")?;
        let marks = parse_number(&raw, "marks")?;

        let text = |key: &str| raw.first(key).unwrap_or_default().to_string();
        let subjects: Vec<String> = raw
            .all("subjects")
            .chain(raw.all("subjects[]"))
            .map(str::to_string)
            .collect();

        Ok(Submission {
            name: text("name"),
            email: text("email"),
            phone: raw.first("phone").map(str::to_string),
            roll: text("roll"),
            reg: text("reg"),
            semester: text("semester"),
            branch: raw.first("branch").unwrap_or(DEFAULT_BRANCH).to_string(),
            subjects,
            attendance,
            marks,
            photo: raw.photo.clone().ok_or_else(|| {
                AppError::Validation("Missing required field(s): photo".to_string())
            })?,
        })
    }

    /// Subjects as a single display string.
    pub fn subjects_display(&self) -> String {
        self.subjects.join(", ")
    }
}

fn parse_number(raw: &RawForm, key: &str) -> Result<f64, AppError> {
    let value = raw.first(key).unwrap_or_default();
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::Validation(format!("'{key}' must be a number, got '{value}'")))
}

/// Formats a number the way it is echoed back to the student: shortest
/// round-trip form, always with a fractional part (`55` → `55.0`).
pub fn display_number(n: f64) -> String {
    format!("{n:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::fixtures::ravi_form;

    #[test]
    fn test_parse_complete_form() {
        let s = Submission::parse(ravi_form()).unwrap();
        assert_eq!(s.name, "Ravi Kumar");
        assert_eq!(s.phone.as_deref(), Some("9876543210"));
        assert_eq!(s.attendance, 55.0);
        assert_eq!(s.marks, 30.0);
        assert_eq!(s.subjects_display(), "Math, Physics");
        assert_eq!(s.branch, "CSE");
        assert_eq!(s.photo.original_name, "ravi.png");
    }

    #[test]
    fn test_optional_fields_default() {
        let mut raw = ravi_form();
        raw.text.remove("phone");
        raw.text.remove("branch");
        raw.text.remove("subjects");
        let s = Submission::parse(raw).unwrap();
        assert_eq!(s.phone, None);
        assert_eq!(s.branch, DEFAULT_BRANCH);
        assert_eq!(s.subjects_display(), "");
    }

    #[test]
    fn test_blank_phone_counts_as_absent() {
        let mut raw = ravi_form();
        raw.text.insert("phone".into(), vec!["   ".into()]);
        assert_eq!(Submission::parse(raw).unwrap().phone, None);
    }

    #[test]
    fn test_missing_roll_is_validation_error() {
        let mut raw = ravi_form();
        raw.text.remove("roll");
        match Submission::parse(raw) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("roll"), "{msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let mut raw = ravi_form();
        raw.text.remove("email");
        raw.photo = None;
        let err = Submission::parse(raw).unwrap_err().to_string();
        assert!(err.contains("email") && err.contains("photo"), "{err}");
    }

    #[test]
    fn test_non_numeric_attendance_rejected() {
        let mut raw = ravi_form();
        raw.text.insert("attendance".into(), vec!["ninety".into()]);
        assert!(matches!(
            Submission::parse(raw),
            Err(AppError::Validation(_))
        ));

        let mut raw = ravi_form();
        raw.text.insert("marks".into(), vec!["NaN".into()]);
        assert!(matches!(
            Submission::parse(raw),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_bracketed_subject_key_accepted() {
        let mut raw = ravi_form();
        raw.text.remove("subjects");
        raw.push_text("subjects[]", "Chemistry");
        raw.push_text("subjects[]", "Biology");
        let s = Submission::parse(raw).unwrap();
        assert_eq!(s.subjects, vec!["Chemistry", "Biology"]);
    }

    #[test]
    fn test_display_number_keeps_fraction() {
        assert_eq!(display_number(55.0), "55.0");
        assert_eq!(display_number(72.5), "72.5");
        assert_eq!(display_number(0.1), "0.1");
    }
}
