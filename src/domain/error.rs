use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Input rejected: {0}")]
    InputRejected(String),

    #[error("Clipboard permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    Io(String),
}
