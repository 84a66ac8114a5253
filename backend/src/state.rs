use std::sync::Arc;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(args: Args) -> Self {
        Self {
            args: Arc::new(args),
            http: reqwest::Client::new(),
        }
    }
}
