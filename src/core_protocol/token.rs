use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::constants::{EOF_TOKEN_LEN, TOKEN_CLOSE, TOKEN_OPEN};
use crate::core_protocol::error::ProtocolError;

/// Per-session end-of-message delimiter: `<`, eight random alphanumeric
/// bytes, `>`. Generated by the server once per session and announced as
/// the first (and only unframed) message on the connection.
///
/// Each session carries its own token; it is never process-wide state, so
/// concurrent connections cannot collide on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EofToken([u8; EOF_TOKEN_LEN]);

impl EofToken {
    /// Generates a fresh random token for one session.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; EOF_TOKEN_LEN];
        bytes[0] = TOKEN_OPEN;
        for slot in bytes.iter_mut().take(EOF_TOKEN_LEN - 1).skip(1) {
            *slot = rng.sample(Alphanumeric);
        }
        bytes[EOF_TOKEN_LEN - 1] = TOKEN_CLOSE;
        Self(bytes)
    }

    /// Rebuilds the token a server announced during the handshake.
    ///
    /// The sentinel framing and the alphanumeric body are checked; anything
    /// else means the handshake read was malformed and the connection is
    /// unusable.
    pub fn from_wire(bytes: [u8; EOF_TOKEN_LEN]) -> Result<Self, ProtocolError> {
        let body_ok = bytes[1..EOF_TOKEN_LEN - 1]
            .iter()
            .all(|b| b.is_ascii_alphanumeric());
        if bytes[0] != TOKEN_OPEN || bytes[EOF_TOKEN_LEN - 1] != TOKEN_CLOSE || !body_ok {
            return Err(ProtocolError::InvalidToken(
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EofToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}
