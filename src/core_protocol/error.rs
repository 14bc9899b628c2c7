use thiserror::Error;

/// Stream-level failures. Any of these ends the session: once the framing
/// is lost there is no way to resynchronize on the byte stream.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("connection closed before the end-of-message token was received")]
    UnexpectedEof,

    #[error("malformed handshake token: {0:?}")]
    InvalidToken(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
