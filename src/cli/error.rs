//! CLI-level errors (wraps tree and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Settings(e) => match e {
                SettingsError::Read { .. } => crate::exitcode::NOINPUT,
                SettingsError::Invalid { .. } => crate::exitcode::USAGE,
                SettingsError::Parse { .. }
                | SettingsError::Env(_)
                | SettingsError::Serialize(_) => crate::exitcode::CONFIG,
            },
            CliError::Tree(e) => match e {
                TreeError::InvalidArgument(_) => crate::exitcode::USAGE,
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case(CliError::InvalidArgs("x".into()), crate::exitcode::USAGE)]
    #[case(CliError::Tree(TreeError::Internal("x".into())), crate::exitcode::SOFTWARE)]
    #[case(CliError::Tree(TreeError::InvalidArgument("x".into())), crate::exitcode::USAGE)]
    #[case(
        CliError::Settings(SettingsError::Parse {
            path: PathBuf::from("a.toml"),
            message: "x".into(),
        }),
        crate::exitcode::CONFIG
    )]
    fn given_error_when_mapped_then_sysexits_code(#[case] error: CliError, #[case] expected: i32) {
        assert_eq!(error.exit_code(), expected);
    }
}
