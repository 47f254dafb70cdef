//! Axum route handlers for the submission form, result page and stored artifacts.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::submission::form::{RawForm, Submission};
use crate::views;

/// GET /
pub async fn handle_form() -> Html<&'static str> {
    Html(views::FORM_PAGE)
}

/// POST /result
///
/// The whole body is read and validated before anything is written to disk.
pub async fn handle_result(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let raw = RawForm::from_multipart(multipart).await?;
    let submission = Submission::parse(raw)?;
    let view = state.submissions.handle(submission).await?;
    Ok(Html(views::render_result(&view)))
}

/// GET /uploads/:filename
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.submissions.store().read_upload(&filename).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], bytes).into_response())
}

/// GET /reports/:filename
pub async fn handle_report(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.submissions.store().read_report(&filename).await?;
    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&filename).to_string()),
            (header::CONTENT_DISPOSITION, inline_disposition(&filename)),
        ],
        bytes,
    )
        .into_response())
}

/// Stored names never contain quotes or backslashes. Non-ASCII names use the
/// RFC 6266 `filename*` form.
fn inline_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        format!("inline; filename=\"{filename}\"")
    } else {
        format!("inline; filename*=UTF-8''{}", urlencoding::encode(filename))
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("a_face.PNG"), "image/png");
        assert_eq!(content_type_for("a_face.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("Ravi_Kumar_report.pdf"), "application/pdf");
        assert_eq!(content_type_for("a_upload"), "application/octet-stream");
    }

    #[test]
    fn test_inline_disposition_encodes_non_ascii_names() {
        assert_eq!(
            inline_disposition("Ravi_Kumar_report.pdf"),
            "inline; filename=\"Ravi_Kumar_report.pdf\""
        );
        assert_eq!(
            inline_disposition("अमर_report.pdf"),
            "inline; filename*=UTF-8''%E0%A4%85%E0%A4%AE%E0%A4%B0_report.pdf"
        );
    }
}
