//! docs-mcp: MCP server exposing project documentation to AI assistants
//!
//! The server answers JSON-RPC 2.0 requests framed with `Content-Length`
//! headers on stdin/stdout. It offers search over a documentation directory,
//! changelog lookup, built-in examples and a configuration reference as MCP
//! tools and resources.
//!
//! # Modules
//!
//! - [`mcp`]: framing, dispatch, capability registry and server loop
//! - [`capabilities`]: the concrete tools and resources
//! - [`docs`]: documentation sources (corpus, changelog, catalog, reference)
//! - [`config`]: configuration loading and validation
//! - [`error`]: error types

pub mod capabilities;
pub mod config;
pub mod docs;
pub mod error;
pub mod mcp;
