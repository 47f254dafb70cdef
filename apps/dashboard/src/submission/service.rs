//! Submission pipeline: store photo → classify → render PDF → build deep link.
//!
//! Steps are not transactional. If rendering fails after the photo was
//! stored, the photo stays on disk as an orphan.

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::evaluation::{classify, Evaluation};
use crate::notify::build_deep_link;
use crate::report::{render_report, ReportField};
use crate::storage::{report_file_name, FileStore, ReportNaming};
use crate::submission::form::{display_number, Submission};

/// Everything the result page needs: echoed fields, derived values, artifact links.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub name: String,
    pub email: String,
    pub roll: String,
    pub reg: String,
    pub semester: String,
    pub branch: String,
    pub subjects: String,
    pub attendance: f64,
    pub marks: f64,
    pub evaluation: Evaluation,
    pub photo_url: String,
    pub pdf_file: String,
    /// `None` when no phone number was submitted.
    pub whatsapp_link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubmissionService {
    store: FileStore,
    country_code: String,
    report_naming: ReportNaming,
}

impl SubmissionService {
    pub fn new(store: FileStore, country_code: impl Into<String>, report_naming: ReportNaming) -> Self {
        Self {
            store,
            country_code: country_code.into(),
            report_naming,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            FileStore::new(&config.upload_dir, &config.report_dir),
            config.whatsapp_country_code.clone(),
            config.report_naming,
        )
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub async fn handle(&self, submission: Submission) -> Result<ResultView, AppError> {
        let photo = self
            .store
            .save_photo(&submission.photo.original_name, &submission.photo.bytes)
            .await?;

        let evaluation = classify(submission.attendance, submission.marks);

        let pdf_file = report_file_name(&submission.name, self.report_naming);
        let pdf_path = self.store.report_path(&pdf_file);
        let fields = report_fields(&submission, &evaluation);
        let photo_path = photo.path.clone();
        tokio::task::spawn_blocking(move || render_report(&pdf_path, &fields, &photo_path))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed rendering report: {e}"))
            })?
            .map_err(|e| {
                warn!(
                    "Report rendering failed; photo {} left in place",
                    photo.file_name
                );
                AppError::from(e)
            })?;

        let whatsapp_link = submission.phone.as_deref().map(|phone| {
            build_deep_link(
                &self.country_code,
                phone,
                &submission.name,
                &submission.branch,
                evaluation.outcome,
                evaluation.risk,
            )
        });

        info!(
            "Processed submission for roll {}: {} / {} (report {})",
            submission.roll, evaluation.risk, evaluation.outcome, pdf_file
        );

        let subjects = submission.subjects_display();
        Ok(ResultView {
            name: submission.name,
            email: submission.email,
            roll: submission.roll,
            reg: submission.reg,
            semester: submission.semester,
            branch: submission.branch,
            subjects,
            attendance: submission.attendance,
            marks: submission.marks,
            evaluation,
            photo_url: photo.url(),
            pdf_file,
            whatsapp_link,
        })
    }
}

/// The twelve report rows, in print order.
pub fn report_fields(submission: &Submission, evaluation: &Evaluation) -> Vec<ReportField> {
    vec![
        ReportField::new("Name", submission.name.as_str()),
        ReportField::new("Email", submission.email.as_str()),
        ReportField::new("Roll Number", submission.roll.as_str()),
        ReportField::new("Registration Number", submission.reg.as_str()),
        ReportField::new("Semester", submission.semester.as_str()),
        ReportField::new("Branch / Stream", submission.branch.as_str()),
        ReportField::new("Subjects", submission.subjects_display()),
        ReportField::new(
            "Attendance",
            format!("{}%", display_number(submission.attendance)),
        ),
        ReportField::new("Marks", display_number(submission.marks)),
        ReportField::new("Risk Level", evaluation.risk.label()),
        ReportField::new("Final Result", evaluation.outcome.label()),
        ReportField::new("Suggestion", evaluation.advisory),
    ]
}
