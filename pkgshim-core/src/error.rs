use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Missing or invalid arguments, or an unknown command.
pub const ERROR_WRONG_USAGE: i32 = 1;
/// The package-management facility an operation needs is not on this host.
pub const ERROR_NO_PACKAGING_TOOLS: i32 = 2;
/// Anything else that went wrong while dispatching.
pub const ERROR_EXCEPTION: i32 = 3;

#[derive(Error, Debug)]
pub enum ShimError {
    Usage(String),
    ToolMissing(String),
    Command(String),
    Io(#[from] std::io::Error),
    Serialization(String),
    Internal(String),
    Other(#[from] anyhow::Error),
}

impl ShimError {
    /// Process exit code this error terminates the run with.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShimError::Usage(_) => ERROR_WRONG_USAGE,
            ShimError::ToolMissing(_) => ERROR_NO_PACKAGING_TOOLS,
            _ => ERROR_EXCEPTION,
        }
    }

    /// Errors that stop the run without a diagnostic trace.
    pub fn is_expected(&self) -> bool {
        matches!(self, ShimError::Usage(_) | ShimError::ToolMissing(_))
    }
}

impl Display for ShimError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ShimError::Usage(s) => write!(f, "{}", s),
            ShimError::ToolMissing(s) => write!(f, "Error: {}", s),
            ShimError::Command(s) => write!(f, "Command failed: {}", s),
            ShimError::Io(e) => write!(f, "I/O error: {}", e),
            ShimError::Serialization(s) => write!(f, "Serialization error: {}", s),
            ShimError::Internal(s) => write!(f, "Internal error: {}", s),
            ShimError::Other(e) => write!(f, "Other error: {}", e),
        }
    }
}

impl From<serde_json::Error> for ShimError {
    fn from(err: serde_json::Error) -> Self {
        ShimError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShimError>;
