//! Error handling for capital-gains
//!
//! Defines the domain error types and establishes a unified Result type
//! using anyhow for context chaining in the CLI plumbing.

use thiserror::Error;

/// Core error types for operation parsing and configuration
#[derive(Error, Debug)]
pub enum CapitalGainsError {
    #[error("invalid operation kind: {0}")]
    InvalidOperationKind(String),

    #[error("invalid JSON format: {0}")]
    InvalidJson(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("arithmetic overflow computing {0}")]
    ArithmeticOverflow(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application plumbing
pub type Result<T> = anyhow::Result<T>;
