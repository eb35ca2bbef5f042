use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML. Original error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML. Original error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// A candidate value was rejected by an input's validator.
    #[error("Value \"{value}\" for input \"{input}\" is invalid: {reason}")]
    InvalidValue { input: String, value: String, reason: String },

    /// CLI-facing translation of [`Error::InvalidValue`], naming the flag.
    #[error("Value \"{value}\" for option --{option} is invalid: {reason}")]
    InvalidOptionValue { option: String, value: String, reason: String },

    #[error("No input named \"{name}\" found.")]
    UnknownInput { name: String },

    #[error("Cannot process command '{command}'. Original error: {e}")]
    ProcessError { command: String, e: String },

    #[error(
        "poetry doesn't seem to be installed. \
         See https://python-poetry.org/docs/#installation, then re-run pyforge."
    )]
    InstallerNotFound,

    /// When `poetry install` ran but finished with an error.
    #[error("poetry install failed with status: {status}")]
    InstallExecutionError { status: ExitStatus },
}

/// Convenience type alias for Results with pyforge's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
