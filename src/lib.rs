//! # dbconf
//!
//! Typed database connection settings loaded from the process environment,
//! with a `.env` file as fallback.
//!
//! Construct [`config::Settings`] once at startup and pass it to whatever
//! needs it. Construction either yields all five fields or fails naming
//! every missing key.

pub mod config;
pub mod error;
pub mod telemetry;
