//! Error types for plan-meta

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration document does not match the expected shape: {message}")]
    InvalidDocument { message: String },
}
