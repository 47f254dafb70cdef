use std::sync::Arc;

use crate::config::Config;
use crate::submission::SubmissionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Submission pipeline, constructed from `config` at startup.
    pub submissions: Arc<SubmissionService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let submissions = SubmissionService::from_config(&config);
        Self {
            config: Arc::new(config),
            submissions: Arc::new(submissions),
        }
    }
}
