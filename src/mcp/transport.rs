//! Header-framed transport for the MCP server.
//!
//! Every message on the wire is one frame:
//!
//! ```text
//! Content-Length: <body length in bytes>\r\n
//! \r\n
//! {"jsonrpc":"2.0","id":1,"method":"initialize"}
//! ```
//!
//! - Header lines have the form `Name: Value`; only `Content-Length` is
//!   meaningful and it is matched case-insensitively
//! - Lines that are not `Name: Value` are ignored
//! - stdin carries requests, stdout carries responses, stderr is for logging
//!
//! The transport is generic over its reader and writer so the same codec
//! runs against stdio in production and in-memory buffers in tests.

use std::io;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::FrameError;
use crate::mcp::protocol::JsonRpcResponse;

/// Name of the only header the codec interprets.
const CONTENT_LENGTH: &str = "Content-Length";

/// One frame read from the input stream.
#[derive(Debug)]
pub enum Frame {
    /// A complete body that parsed as JSON.
    Message(Value),
    /// A frame that cannot be turned into a message. It is dropped without a reply.
    Discarded(FrameError),
}

/// A framed JSON-RPC transport over a byte stream.
pub struct FramedTransport<R, W> {
    /// Buffered input stream.
    reader: R,
    /// Output stream.
    writer: W,
}

/// The transport used by the binary: stdin in, stdout out.
pub type StdioTransport = FramedTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

impl StdioTransport {
    /// Creates a transport over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> FramedTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a transport over the given reader and writer.
    #[must_use]
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consumes the transport, returning the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Reads the next frame.
    ///
    /// Returns `None` once the stream ends before a complete frame is
    /// available, whether that happens in the headers or part-way through
    /// the body.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying stream fails.
    pub async fn read_frame(&mut self) -> io::Result<Option<Frame>> {
        let Some(content_length) = self.read_headers().await? else {
            return Ok(None);
        };

        let length = match content_length {
            Ok(length) => length,
            Err(error) => return Ok(Some(Frame::Discarded(error))),
        };

        let mut body = vec![0u8; length];
        match self.reader.read_exact(&mut body).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        }

        Ok(Some(match serde_json::from_slice(&body) {
            Ok(value) => Frame::Message(value),
            Err(e) => Frame::Discarded(FrameError::InvalidBody(e)),
        }))
    }

    /// Reads header lines up to and including the blank separator line.
    ///
    /// The outer `None` means end of stream. The inner result is the
    /// parsed `Content-Length`, or why it is unusable.
    async fn read_headers(&mut self) -> io::Result<Option<Result<usize, FrameError>>> {
        let mut content_length = None;

        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None);
            }

            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                break;
            }

            let Some((name, value)) = line.split_once(':') else {
                tracing::trace!(line, "Ignoring malformed header line");
                continue;
            };

            if name.trim().eq_ignore_ascii_case(CONTENT_LENGTH) {
                content_length = Some(value.trim().to_string());
            }
        }

        let parsed = match content_length {
            None => Err(FrameError::MissingContentLength),
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| FrameError::InvalidContentLength(raw)),
        };

        Ok(Some(parsed))
    }

    /// Writes a response frame and flushes it.
    ///
    /// `Content-Length` is the byte length of the encoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub async fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let body = serde_json::to_vec(response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        self.write_frame(&body).await
    }

    /// Writes raw body bytes as one frame.
    async fn write_frame(&mut self, body: &[u8]) -> io::Result<()> {
        let header = format!("{CONTENT_LENGTH}: {}\r\n\r\n", body.len());

        self.writer.write_all(header.as_bytes()).await?;
        self.writer.write_all(body).await?;
        self.writer.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::RequestId;

    fn transport(input: &[u8]) -> FramedTransport<&[u8], Vec<u8>> {
        FramedTransport::new(input, Vec::new())
    }

    #[tokio::test]
    async fn reads_single_frame() {
        let input = b"Content-Length: 17\r\n\r\n{\"method\":\"ping\"}";
        let mut t = transport(input);

        let Some(Frame::Message(value)) = t.read_frame().await.unwrap() else {
            panic!("Expected a message frame");
        };
        assert_eq!(value["method"], "ping");
        assert!(t.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn header_name_is_case_insensitive() {
        let input = b"content-length: 2\n\n{}";
        let mut t = transport(input);
        assert!(matches!(
            t.read_frame().await.unwrap(),
            Some(Frame::Message(_))
        ));
    }

    #[tokio::test]
    async fn ignores_malformed_and_unknown_headers() {
        let input = b"garbage line\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\r\n{}";
        let mut t = transport(input);
        assert!(matches!(
            t.read_frame().await.unwrap(),
            Some(Frame::Message(_))
        ));
    }

    #[tokio::test]
    async fn missing_content_length_is_discarded_not_fatal() {
        let input = b"X-Other: 1\r\n\r\nContent-Length: 2\r\n\r\n{}";
        let mut t = transport(input);

        assert!(matches!(
            t.read_frame().await.unwrap(),
            Some(Frame::Discarded(FrameError::MissingContentLength))
        ));
        assert!(matches!(
            t.read_frame().await.unwrap(),
            Some(Frame::Message(_))
        ));
    }

    #[tokio::test]
    async fn non_numeric_content_length_is_discarded() {
        let input = b"Content-Length: lots\r\n\r\n";
        let mut t = transport(input);
        assert!(matches!(
            t.read_frame().await.unwrap(),
            Some(Frame::Discarded(FrameError::InvalidContentLength(_)))
        ));
    }

    #[tokio::test]
    async fn truncated_body_is_end_of_stream() {
        let input = b"Content-Length: 5\r\n\r\n{}x";
        let mut t = transport(input);
        assert!(t.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn eof_inside_headers_is_end_of_stream() {
        let input = b"Content-Length: 5\r\n";
        let mut t = transport(input);
        assert!(t.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_json_body_is_discarded() {
        let input = b"Content-Length: 3\r\n\r\n{{{";
        let mut t = transport(input);
        assert!(matches!(
            t.read_frame().await.unwrap(),
            Some(Frame::Discarded(FrameError::InvalidBody(_)))
        ));
    }

    #[tokio::test]
    async fn headers_split_across_reads() {
        let mock = tokio_test::io::Builder::new()
            .read(b"Content-Le")
            .read(b"ngth: 2\r")
            .read(b"\n\r\n{")
            .read(b"}")
            .build();
        let mut t = FramedTransport::new(BufReader::new(mock), Vec::new());

        assert!(matches!(
            t.read_frame().await.unwrap(),
            Some(Frame::Message(_))
        ));
        assert!(t.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_uses_byte_length() {
        let mut t = transport(b"");
        let response = JsonRpcResponse::success(
            Some(RequestId::Number(1)),
            serde_json::json!({"text": "größe ✓"}),
        );
        t.write_response(&response).await.unwrap();

        let (_, out) = t.into_inner();
        let out = String::from_utf8(out).unwrap();
        let (header, body) = out.split_once("\r\n\r\n").unwrap();
        let declared: usize = header
            .strip_prefix("Content-Length: ")
            .unwrap()
            .parse()
            .unwrap();

        assert_eq!(declared, body.len());
        assert!(declared > body.chars().count());
    }
}
