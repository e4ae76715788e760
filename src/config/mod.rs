//! Typed database settings from environment variables.
//!
//! Loads once at startup, fails fast if any required key is missing.
//! Process variables take precedence over the `.env` file; every missing key
//! is reported together. The password is wrapped in
//! `secrecy::SecretString` so it cannot leak through `Debug` or logs.

pub mod env_file;
pub mod environment;
pub mod secrets;

pub use env_file::EnvFile;
pub use environment::Environment;

use crate::error::{Error, Result};
use secrecy::SecretString;

pub const DB_USER: &str = "db_user";
pub const DB_PASSWORD: &str = "db_password";
pub const DB_HOST: &str = "db_host";
pub const DB_PORT: &str = "db_port";
pub const DB_NAME: &str = "db_name";

const KEY_COUNT: usize = 5;

/// Required keys in canonical order. Missing-key errors follow this order.
pub const REQUIRED_KEYS: [&str; KEY_COUNT] = [DB_USER, DB_PASSWORD, DB_HOST, DB_PORT, DB_NAME];

#[derive(Debug)]
pub struct Settings {
    db_user: String,
    db_password: SecretString,
    db_host: String,
    db_port: String,
    db_name: String,
}

impl Settings {
    /// Load settings from the process environment, falling back to the
    /// `.env` file in the working directory (or `$DBCONF_ENV_FILE`).
    pub fn from_env() -> Result<Self> {
        let env = Environment::capture();
        let override_path = std::env::var_os(env_file::ENV_FILE_VAR);
        let file = EnvFile::load(env_file::default_path(override_path.as_deref()))?;
        Self::from_sources(&env, &file)
    }

    /// Resolve settings from explicit sources without touching the process.
    pub fn from_sources(env: &Environment, file: &EnvFile) -> Result<Self> {
        match REQUIRED_KEYS.map(|key| lookup(key, env, file)) {
            [
                Ok(Some(db_user)),
                Ok(Some(db_password)),
                Ok(Some(db_host)),
                Ok(Some(db_port)),
                Ok(Some(db_name)),
            ] => Ok(Self {
                db_user,
                db_password: SecretString::from(db_password),
                db_host,
                db_port,
                db_name,
            }),
            unresolved => Err(resolution_error(unresolved)),
        }
    }

    pub fn db_user(&self) -> &str {
        &self.db_user
    }

    pub fn db_password(&self) -> &SecretString {
        &self.db_password
    }

    pub fn db_host(&self) -> &str {
        &self.db_host
    }

    /// Port as written. May be a service alias or socket path.
    pub fn db_port(&self) -> &str {
        &self.db_port
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Non-secret fields, space separated: user, host, port, name.
    pub fn public_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.db_user, self.db_host, self.db_port, self.db_name
        )
    }
}

/// Error for a lookup that left at least one key unresolved. Missing keys
/// are reported ahead of invalid values.
fn resolution_error(lookups: [Result<Option<String>>; KEY_COUNT]) -> Error {
    let mut missing = Vec::new();
    let mut invalid = None;
    for (key, lookup) in REQUIRED_KEYS.into_iter().zip(lookups) {
        match lookup {
            Ok(Some(_)) => {}
            Ok(None) => missing.push(key),
            Err(err) => {
                invalid.get_or_insert(err);
            }
        }
    }

    match invalid {
        Some(err) if missing.is_empty() => err,
        _ => {
            tracing::debug!(missing = ?missing, "required configuration missing");
            Error::MissingConfiguration(missing)
        }
    }
}

/// Environment first, then file. `Ok(None)` means neither has a usable value.
fn lookup(key: &'static str, env: &Environment, file: &EnvFile) -> Result<Option<String>> {
    if let Some(raw) = env.get(key) {
        match raw.to_str() {
            Some(value) if !value.trim().is_empty() => {
                tracing::debug!(key, source = "environment", "resolved");
                return Ok(Some(value.to_string()));
            }
            Some(_) => {}
            None => {
                return Err(Error::InvalidConfiguration {
                    key: key.to_string(),
                    message: "value is not valid UTF-8".to_string(),
                });
            }
        }
    }

    Ok(file.get(key).map(|value| {
        tracing::debug!(key, source = "env file", "resolved");
        value.to_string()
    }))
}
