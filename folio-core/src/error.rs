use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
