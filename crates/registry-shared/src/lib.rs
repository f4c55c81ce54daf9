//! # Registry Shared
//!
//! Configuration, telemetry and constants shared by the registry client crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use config::ClientConfig;
pub use error::AppError;
