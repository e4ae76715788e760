//! Secret handling utilities.
//!
//! Re-exports the secrecy types `Settings` hands out, so callers can read
//! the password without depending on secrecy directly.

pub use secrecy::{ExposeSecret, SecretString};
