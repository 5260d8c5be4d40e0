// Application state module
// Immutable state shared by every connection task

use std::sync::Arc;

use super::types::Config;
use crate::engine::Evaluator;
use crate::handler::static_files::StaticAssets;

/// Application state
pub struct AppState {
    pub config: Config,
    pub assets: StaticAssets,
    pub evaluator: Arc<dyn Evaluator>,
}

impl AppState {
    pub fn new(config: Config, assets: StaticAssets, evaluator: Arc<dyn Evaluator>) -> Self {
        Self {
            config,
            assets,
            evaluator,
        }
    }

    /// Whether the error page may include internal detail
    pub const fn verbose_errors(&self) -> bool {
        self.config.server.mode.is_development()
    }
}
