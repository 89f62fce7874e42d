//! CLI-level errors (wraps domain and settings errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{RecordId, TreeError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot render settings: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("node not found: {0}")]
    NodeNotFound(RecordId),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Tree(e) => match e {
                TreeError::MissingArgument(_) => crate::exitcode::USAGE,
                TreeError::InvalidConfig(_) => crate::exitcode::CONFIG,
                TreeError::InvalidRecord { .. }
                | TreeError::DuplicateId(_)
                | TreeError::CycleDetected(_) => crate::exitcode::DATAERR,
            },
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Render(_) | CliError::Encode(_) => crate::exitcode::SOFTWARE,
            CliError::Read { .. } => crate::exitcode::NOINPUT,
            CliError::Parse { .. } | CliError::NodeNotFound(_) => crate::exitcode::DATAERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_domain_errors_when_mapping_then_uses_sysexits_codes() {
        assert_eq!(
            CliError::from(TreeError::InvalidConfig("id")).exit_code(),
            crate::exitcode::CONFIG
        );
        assert_eq!(
            CliError::from(TreeError::CycleDetected(RecordId::Int(1))).exit_code(),
            crate::exitcode::DATAERR
        );
        assert_eq!(
            CliError::Usage("no command".into()).exit_code(),
            crate::exitcode::USAGE
        );
    }
}
