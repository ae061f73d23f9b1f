use std::sync::Arc;

use pipeweight_domain::model::SpecTable;

/// Shared request state. The spec table is read-only for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<SpecTable>,
}

impl AppState {
    pub fn new(table: SpecTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}
