// Submission pipeline: multipart form → typed Submission → stored photo,
// evaluation, PDF report and deep link → result view.

pub mod form;
pub mod handlers;
pub mod service;

#[cfg(test)]
pub mod fixtures;

pub use service::{ResultView, SubmissionService};
