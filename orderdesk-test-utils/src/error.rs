use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    #[error(transparent)]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    CsvError(#[from] csv::Error),
    #[error("Failed to write CSV fixture: {0}")]
    CsvWriteError(String),
    #[error("Failed to hash fixture password: {0}")]
    PasswordHashError(String),
}
