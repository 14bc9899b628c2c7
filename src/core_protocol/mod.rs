pub mod error;
pub mod framing;
pub mod token;

pub use error::ProtocolError;
pub use token::EofToken;
