use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::files::{self, Outcome, ServeContext, StreamedFile};
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

pub struct Connection {
    stream: TcpStream,
    buffer: Vec<u8>,
    state: ConnectionState,
    ctx: Arc<ServeContext>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Streaming(StreamedFile, bool),
    Closed,
}

/// What the read phase produced.
enum NextRequest {
    Parsed(Request),
    Malformed,
    Disconnected,
}

impl Connection {
    pub fn new(stream: TcpStream, ctx: Arc<ServeContext>) -> Self {
        Self {
            stream,
            buffer: Vec::with_capacity(4096),
            state: ConnectionState::Reading,
            ctx,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    NextRequest::Parsed(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    NextRequest::Malformed => {
                        let writer = ResponseWriter::new(&Response::bad_request());
                        self.state = ConnectionState::Writing(writer, false);
                    }
                    NextRequest::Disconnected => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let keep_alive = req.keep_alive();

                    match files::serve(&self.ctx, req).await {
                        Outcome::Response(response) => {
                            let writer = ResponseWriter::new(&response);
                            self.state = ConnectionState::Writing(writer, keep_alive);
                        }
                        Outcome::File(file) => {
                            self.state = ConnectionState::Streaming(file, keep_alive);
                        }
                    }
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading;
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Streaming(_, _) => {
                    // Take the file out of the state so it owns its handle
                    // for the duration of the transfer.
                    let state = std::mem::replace(&mut self.state, ConnectionState::Closed);
                    let ConnectionState::Streaming(file, keep_alive) = state else {
                        unreachable!();
                    };

                    // An error mid-stream leaves the response half sent;
                    // propagating it drops the connection without a second
                    // status line.
                    file.send(&mut self.stream).await?;

                    if keep_alive {
                        self.state = ConnectionState::Reading;
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<NextRequest> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.drain(..consumed);
                    return Ok(NextRequest::Parsed(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    tracing::debug!("HTTP parse error: {:?}", e);
                    return Ok(NextRequest::Malformed);
                }
            }

            let mut temp = [0u8; 1024];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                // Client closed connection
                return Ok(NextRequest::Disconnected);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
