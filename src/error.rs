//! Error types for docs-mcp.
//!
//! Three families live here:
//!
//! - [`ConfigError`]: loading and validating the configuration file
//! - [`ToolError`]: failures raised inside a tool or resource
//! - [`FrameError`]: malformed frames on the input stream (logged, never answered)

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised by a tool call or resource read.
///
/// The dispatcher reports every variant to the client as an internal error
/// carrying the display text.
#[derive(Error, Debug)]
pub enum ToolError {
    /// A required argument was not supplied.
    #[error("Missing required parameter: {name}")]
    MissingArgument {
        /// Argument name.
        name: &'static str,
    },

    /// An argument was supplied with the wrong type or an unusable value.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A documentation source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Source {
        /// Path of the file or directory.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The corpus search pattern could not be built.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Reasons a frame was dropped by the framing codec.
#[derive(Error, Debug)]
pub enum FrameError {
    /// The header block ended without a `Content-Length` header.
    #[error("frame has no Content-Length header")]
    MissingContentLength,

    /// The `Content-Length` value was not a non-negative integer.
    #[error("invalid Content-Length value: {0:?}")]
    InvalidContentLength(String),

    /// The body bytes were not valid JSON.
    #[error("frame body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
}
