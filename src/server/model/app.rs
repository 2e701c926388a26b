use sea_orm::DatabaseConnection;

use crate::server::config::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PAGE_SIZE};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Orders shown per page when listing
    pub page_size: u64,
    /// Largest accepted spreadsheet upload in bytes
    pub max_upload_bytes: usize,
}

impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            page_size: DEFAULT_PAGE_SIZE,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
