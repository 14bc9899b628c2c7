// src/constants.rs

/// Total length of the end-of-message token, sentinels included.
pub const EOF_TOKEN_LEN: usize = 10;
/// Number of random alphanumeric bytes between the sentinels.
pub const TOKEN_BODY_LEN: usize = 8;
pub const TOKEN_OPEN: u8 = b'<';
pub const TOKEN_CLOSE: u8 = b'>';

/// Receive buffer size used when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Marker prefixing every error message sent to a client.
pub const ERROR_MARKER: &str = "Error";
