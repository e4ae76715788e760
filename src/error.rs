//! Error types for dbconf.
//!
//! Messages never carry configuration values, only key names and
//! positions, so they are safe to print for any key including the password.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Every required key that neither the environment nor the `.env` file
    /// supplied, in canonical key order.
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingConfiguration(Vec<&'static str>),

    /// A value that is present but unusable. `key` names the configuration
    /// key, or is `.env` when the env file itself could not be read or
    /// parsed; the file's path is then part of `message`.
    #[error("invalid configuration for {key}: {message}")]
    InvalidConfiguration { key: String, message: String },
}

impl Error {
    /// Keys reported missing, or an empty slice for other errors.
    pub fn missing_keys(&self) -> &[&'static str] {
        match self {
            Error::MissingConfiguration(keys) => keys,
            Error::InvalidConfiguration { .. } => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
