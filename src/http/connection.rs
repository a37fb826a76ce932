use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::debug;

use crate::config::ServerConfig;
use crate::http::dispatcher::Dispatcher;
use crate::http::parser::{parse_http_request_limited, ParseError, DEFAULT_MAX_HEADER_BYTES};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::storage::Storage;

/// Per-connection buffer sizing.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub read_buffer_size: usize,
    pub max_header_bytes: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            read_buffer_size: 4096,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }
}

impl From<&ServerConfig> for ConnectionLimits {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            read_buffer_size: cfg.read_buffer_size.max(1),
            max_header_bytes: cfg.max_header_bytes,
        }
    }
}

pub struct Connection<T, S> {
    stream: T,
    buffer: BytesMut,
    state: ConnectionState,
    dispatcher: Arc<Dispatcher<S>>,
    limits: ConnectionLimits,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<T, S> Connection<T, S>
where
    T: AsyncRead + AsyncWrite + Unpin,
    S: Storage,
{
    pub fn new(stream: T, dispatcher: Arc<Dispatcher<S>>) -> Self {
        Self::with_limits(stream, dispatcher, ConnectionLimits::default())
    }

    pub fn with_limits(stream: T, dispatcher: Arc<Dispatcher<S>>, limits: ConnectionLimits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(limits.read_buffer_size),
            state: ConnectionState::Reading,
            dispatcher,
            limits,
        }
    }

    /// Serves exactly one request, then closes.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        Some(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        None => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = self.dispatcher.dispatch(req).await;

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // No keep-alive
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request_limited(&self.buffer, self.limits.max_header_bytes) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    return Err(anyhow::anyhow!("HTTP parse error: {:?}", e));
                }
            }

            self.buffer.reserve(self.limits.read_buffer_size);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if !self.buffer.is_empty() {
                    debug!(buffered = self.buffer.len(), "Client closed before a complete request");
                }
                return Ok(None);
            }
        }
    }
}
