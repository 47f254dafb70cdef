// One-page PDF summary of a submission.
// Layout is computed separately from PDF emission so it can be tested without a document.
// Rendering is blocking and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

pub use layout::ReportField;
pub use pdf::{render_report, ReportError};
