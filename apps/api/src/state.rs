use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::editor::CvEditor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The single owner of the mutable CV record. Handlers lock it for the
    /// duration of one operation, so edits apply one at a time.
    pub editor: Arc<Mutex<CvEditor>>,
}

impl AppState {
    pub fn new(config: Config, editor: CvEditor) -> Self {
        Self {
            config,
            editor: Arc::new(Mutex::new(editor)),
        }
    }
}
