//! Error types for calls into the persistence host.
use thiserror::Error;

/// Failure reported by a host command.
///
/// The session never surfaces these to the user; each one is logged and
/// resolved to the most conservative default for the command that failed.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("Host unavailable: {0}")]
    Unavailable(String),

    #[error("Recovery storage error: {0}")]
    Recovery(String),
}

/// Result alias for host commands.
pub type HostResult<T> = Result<T, HostError>;
