// Flat-file storage for uploaded photos and generated reports.
// File names are the only addressing mechanism; there is no index.

pub mod naming;
pub mod store;

pub use naming::{report_file_name, ReportNaming};
pub use store::FileStore;
