//! Message framing over an unstructured byte stream.
//!
//! A logical message is `payload ++ token`. The receiver appends chunks to
//! a cumulative buffer and stops when the buffer's tail equals the token;
//! the payload is the buffer with the token stripped. Both sides of a
//! connection use the same routines — the wire format does not distinguish
//! command text from raw file bytes.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::core_protocol::error::ProtocolError;
use crate::core_protocol::token::EofToken;

/// Receives one logical message, stripping the trailing end-of-message
/// token.
///
/// Reads chunks of at most `chunk_size` bytes into a cumulative buffer
/// until the buffer's trailing bytes equal `token`. The comparison always
/// runs against the cumulative tail, never the last chunk alone, so a
/// token split across two reads is still detected. A zero-length read
/// before the terminator is a premature close, not success.
///
/// A payload whose own bytes happen to end a read exactly with the token
/// sequence is indistinguishable from the terminator; the token is random
/// per session precisely to keep that collision improbable, and a session
/// that misframes is torn down rather than resynchronized.
pub async fn receive_message<R>(
    reader: &mut R,
    chunk_size: usize,
    token: &EofToken,
) -> Result<Vec<u8>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let token_bytes = token.as_bytes();
    let mut message: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; chunk_size];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(ProtocolError::UnexpectedEof);
        }
        message.extend_from_slice(&chunk[..n]);

        if message.len() >= token_bytes.len()
            && &message[message.len() - token_bytes.len()..] == token_bytes
        {
            message.truncate(message.len() - token_bytes.len());
            return Ok(message);
        }
    }
}

/// Sends `payload` followed by the end-of-message token.
///
/// The two parts are written as one buffered message; `write_all` retries
/// short writes until the connection has accepted every byte.
pub async fn send_message<W>(
    writer: &mut W,
    payload: &[u8],
    token: &EofToken,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let mut framed = Vec::with_capacity(payload.len() + token.as_bytes().len());
    framed.extend_from_slice(payload);
    framed.extend_from_slice(token.as_bytes());
    writer.write_all(&framed).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    fn test_token() -> EofToken {
        EofToken::from_wire(*b"<1f56xc5d>").unwrap()
    }

    async fn round_trip(payload: &[u8], chunk_size: usize) -> Vec<u8> {
        let (mut tx, mut rx) = tokio::io::duplex(64 * 1024);
        let token = test_token();
        send_message(&mut tx, payload, &token).await.unwrap();
        drop(tx);
        receive_message(&mut rx, chunk_size, &token).await.unwrap()
    }

    #[tokio::test]
    async fn test_round_trip_text() {
        let payload = b"mkdir reports";
        for chunk_size in [1, 3, 7, 64, 1024] {
            assert_eq!(round_trip(payload, chunk_size).await, payload);
        }
    }

    #[tokio::test]
    async fn test_round_trip_empty_payload() {
        assert_eq!(round_trip(b"", 4).await, b"");
        assert_eq!(round_trip(b"", 1024).await, b"");
    }

    #[tokio::test]
    async fn test_round_trip_binary_payload() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
        assert_eq!(round_trip(&payload, 256).await, payload);
    }

    #[tokio::test]
    async fn test_terminator_split_across_reads() {
        // 7 payload bytes + 10 token bytes with a 12-byte chunk: the first
        // read ends 5 bytes into the token, the second carries the rest. A
        // last-chunk-only comparison would never terminate here.
        let payload = b"boundar";
        assert_eq!(round_trip(payload, 12).await, payload);
    }

    #[tokio::test]
    async fn test_payload_containing_token_bytes() {
        // The token appears mid-payload but never at a read boundary's
        // tail, so the cumulative check must read straight past it.
        let token = test_token();
        let mut payload = b"abc".to_vec();
        payload.extend_from_slice(token.as_bytes());
        payload.extend_from_slice(b"xyz");
        for chunk_size in [4, 9, 1024] {
            assert_eq!(round_trip(&payload, chunk_size).await, payload);
        }
    }

    #[tokio::test]
    async fn test_premature_close_is_an_error() {
        let (mut tx, mut rx) = tokio::io::duplex(1024);
        let token = test_token();
        tx.write_all(b"no terminator here").await.unwrap();
        drop(tx);
        let err = receive_message(&mut rx, 8, &token).await.unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof));
    }

    #[tokio::test]
    async fn test_immediate_close_is_an_error() {
        let (tx, mut rx) = tokio::io::duplex(1024);
        drop(tx);
        let err = receive_message(&mut rx, 8, &test_token())
            .await
            .unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof));
    }

    #[tokio::test]
    async fn test_back_to_back_messages_keep_their_boundaries() {
        let (mut tx, mut rx) = tokio::io::duplex(64 * 1024);
        let token = test_token();
        send_message(&mut tx, b"first", &token).await.unwrap();
        send_message(&mut tx, b"second", &token).await.unwrap();
        drop(tx);
        assert_eq!(receive_message(&mut rx, 3, &token).await.unwrap(), b"first");
        assert_eq!(
            receive_message(&mut rx, 3, &token).await.unwrap(),
            b"second"
        );
    }
}
