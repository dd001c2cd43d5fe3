//! Model Context Protocol (MCP) server implementation.
//!
//! The server speaks JSON-RPC 2.0 over stdio, one `Content-Length` framed
//! message at a time.
//!
//! # Architecture
//!
//! ```text
//!   stdin ──▶ Transport ──▶ Dispatcher ──▶ Registry
//!             (framing)     (methods)      (tools, resources)
//!                 │              │
//!   stdout ◀──────┴──── response ┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod dispatcher;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use protocol::{JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use registry::{CapabilityRegistry, Resource, Tool};
pub use server::McpServer;
pub use transport::{FramedTransport, StdioTransport};
