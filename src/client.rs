//! Client side of the protocol, as a library type.
//!
//! `FsClient` performs the token handshake and then issues commands over
//! the framed stream. The server's end-of-message delimiter is state of
//! the connection object — never process-wide — so any number of clients
//! can run concurrently in one process.

use std::io::ErrorKind;

use log::debug;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::constants::{DEFAULT_CHUNK_SIZE, EOF_TOKEN_LEN, ERROR_MARKER};
use crate::core_protocol::{framing, EofToken, ProtocolError};

/// Outcome of one command round-trip: the error the server reported, if
/// any, and the directory status that always follows it.
#[derive(Debug)]
pub struct CommandReply {
    pub error: Option<String>,
    pub status: String,
}

impl CommandReply {
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

/// One client connection to the server.
pub struct FsClient {
    stream: TcpStream,
    eof_token: EofToken,
    chunk_size: usize,
}

impl FsClient {
    /// Connects, reads the fixed-length token announcement and receives
    /// the initial directory status.
    ///
    /// The token bytes are the only unframed read on the connection; they
    /// are consumed by exact length because the delimiter is not known yet.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<(Self, String), ProtocolError> {
        let mut stream = TcpStream::connect(addr).await?;

        let mut raw = [0u8; EOF_TOKEN_LEN];
        stream.read_exact(&mut raw).await.map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                ProtocolError::UnexpectedEof
            } else {
                ProtocolError::Io(e)
            }
        })?;
        let eof_token = EofToken::from_wire(raw)?;
        debug!("negotiated end-of-message token {}", eof_token);

        let mut client = Self {
            stream,
            eof_token,
            chunk_size: DEFAULT_CHUNK_SIZE,
        };
        let status = client.receive_text().await?;
        Ok((client, status))
    }

    pub fn eof_token(&self) -> &EofToken {
        &self.eof_token
    }

    /// Issues `cd <path>`.
    pub async fn cd(&mut self, path: &str) -> Result<CommandReply, ProtocolError> {
        self.send_line(&format!("cd {}", path)).await?;
        self.read_reply().await
    }

    /// Issues `mkdir <name>`.
    pub async fn mkdir(&mut self, name: &str) -> Result<CommandReply, ProtocolError> {
        self.send_line(&format!("mkdir {}", name)).await?;
        self.read_reply().await
    }

    /// Issues `rm <name>`.
    pub async fn rm(&mut self, name: &str) -> Result<CommandReply, ProtocolError> {
        self.send_line(&format!("rm {}", name)).await?;
        self.read_reply().await
    }

    /// Issues `ul <name>` and streams `content` as the follow-up framed
    /// payload message.
    pub async fn upload(&mut self, name: &str, content: &[u8]) -> Result<CommandReply, ProtocolError> {
        self.send_line(&format!("ul {}", name)).await?;
        framing::send_message(&mut self.stream, content, &self.eof_token).await?;
        self.read_reply().await
    }

    /// Issues `dl <name>`. On success the file bytes come back alongside
    /// the trailing status; on failure the server's error message replaces
    /// them.
    pub async fn download(
        &mut self,
        name: &str,
    ) -> Result<(Option<Vec<u8>>, CommandReply), ProtocolError> {
        self.send_line(&format!("dl {}", name)).await?;

        let first =
            framing::receive_message(&mut self.stream, self.chunk_size, &self.eof_token).await?;
        if let Some(error) = as_error_text(&first) {
            let status = self.receive_text().await?;
            return Ok((
                None,
                CommandReply {
                    error: Some(error),
                    status,
                },
            ));
        }

        let status = self.receive_text().await?;
        Ok((
            Some(first),
            CommandReply {
                error: None,
                status,
            },
        ))
    }

    /// Issues `exit` and drops the connection. No reply follows.
    pub async fn exit(mut self) -> Result<(), ProtocolError> {
        self.send_line("exit").await
    }

    async fn send_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        debug!("issuing command: {:?}", line);
        framing::send_message(&mut self.stream, line.as_bytes(), &self.eof_token).await
    }

    async fn receive_text(&mut self) -> Result<String, ProtocolError> {
        let raw =
            framing::receive_message(&mut self.stream, self.chunk_size, &self.eof_token).await?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    /// Reads the reply cycle for a plain command: an optional error
    /// message, then the routine directory status.
    async fn read_reply(&mut self) -> Result<CommandReply, ProtocolError> {
        let first = self.receive_text().await?;
        if first.starts_with(ERROR_MARKER) {
            let status = self.receive_text().await?;
            return Ok(CommandReply {
                error: Some(first),
                status,
            });
        }
        Ok(CommandReply {
            error: None,
            status: first,
        })
    }
}

/// A downloaded frame starting with the error marker is the server telling
/// us the transfer failed. A file whose content genuinely begins with
/// those bytes is misclassified; the marker check is the protocol's only
/// signal.
fn as_error_text(payload: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(payload).ok()?;
    if text.starts_with(ERROR_MARKER) {
        Some(text.to_string())
    } else {
        None
    }
}
