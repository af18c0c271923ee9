use std::sync::Arc;

use crate::config::Config;
use crate::store::IssueStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn IssueStore>,
    pub config: Config,
}
