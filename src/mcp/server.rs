//! MCP server loop.
//!
//! The loop reads one frame, handles it, writes the reply, and only then
//! reads the next frame. It ends when the input stream closes. Every decoded
//! body gets exactly one reply; a request without an `id` is answered with
//! `id: null`.
//!
//! Per-request failures never escape the loop:
//!
//! - Dropped frames (no `Content-Length`, bad JSON) are logged and skipped
//! - Bodies that are not requests get an `Invalid Request` reply
//! - A panic during dispatch becomes an internal-error reply

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::mcp::dispatcher::Dispatcher;
use crate::mcp::protocol::{parse_request, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::transport::{Frame, FramedTransport};

/// The documentation MCP server.
pub struct McpServer<R, W> {
    /// Request router.
    dispatcher: Dispatcher,
    /// The transport layer.
    transport: FramedTransport<R, W>,
}

impl<R, W> McpServer<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a server over the given dispatcher and transport.
    #[must_use]
    pub const fn new(dispatcher: Dispatcher, transport: FramedTransport<R, W>) -> Self {
        Self {
            dispatcher,
            transport,
        }
    }

    /// Consumes the server, returning its transport.
    pub fn into_transport(self) -> FramedTransport<R, W> {
        self.transport
    }

    /// Runs until the input stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing the underlying streams fails.
    pub async fn run(&mut self) -> io::Result<()> {
        while let Some(frame) = self.transport.read_frame().await? {
            match frame {
                Frame::Discarded(reason) => {
                    tracing::warn!(reason = %reason, "Discarding malformed frame");
                }
                Frame::Message(body) => {
                    let response = self.handle_message(body);
                    self.transport.write_response(&response).await?;
                }
            }
        }

        tracing::info!("Input stream closed");
        Ok(())
    }

    /// Handles one decoded body, returning the reply to send.
    fn handle_message(&self, body: serde_json::Value) -> JsonRpcResponse {
        let request = match parse_request(body) {
            Ok(request) => request,
            Err(response) => {
                tracing::warn!("Rejecting invalid request");
                return response;
            }
        };

        tracing::debug!(method = %request.method, id = ?request.id, "Handling request");

        self.dispatch_isolated(&request)
    }

    /// Dispatches a request, converting a panic into an internal-error reply.
    fn dispatch_isolated(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        panic::catch_unwind(AssertUnwindSafe(|| self.dispatcher.dispatch(request))).unwrap_or_else(
            |payload| {
                let message = panic_message(payload.as_ref());
                tracing::error!(method = %request.method, error = %message, "Request handler panicked");
                JsonRpcResponse::internal_error(request.id.clone(), message)
            },
        )
    }
}

/// Extracts the text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "request handler panicked".to_string())
}
