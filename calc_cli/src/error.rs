//! CLI error type wrapping engine, I/O, config and license failures.

use calc_core::CalcError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error in '{path}': {reason}")]
    Config { path: String, reason: String },

    #[error("Access denied for '{email}': credentials not found in the license list")]
    AccessDenied { email: String },

    #[error("License terms must be accepted")]
    TermsNotAccepted,
}

impl CliError {
    pub fn config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
