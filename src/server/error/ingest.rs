use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::server::error::error_response;

/// Failures that reject an uploaded file as a whole.
///
/// Row-level problems never surface here; they are reported as warnings on the ingestion
/// result instead.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("No file was uploaded")]
    MissingFile,
    #[error("Uploaded file exceeds the maximum size of {0} bytes")]
    FileTooLarge(usize),
    #[error("Unsupported file type {0:?}, expected one of: xlsx, xlsm, xlsb, xls, ods, csv")]
    UnsupportedFileType(String),
    #[error("Failed to read uploaded file: {0}")]
    UnreadableFile(String),
    #[error("Uploaded file has no header row")]
    EmptyFile,
    #[error("Uploaded file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Failed to save uploaded orders, no records were saved: {0}")]
    CommitFailure(String),
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        match self {
            Self::CommitFailure(_) => {
                tracing::error!("{}", self);

                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A serious error occurred while saving the file, no records were saved.",
                )
            }
            Self::FileTooLarge(_) => error_response(StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            err => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        }
    }
}
