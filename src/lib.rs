//! rouillefsd — a token-delimited remote filesystem server.
//!
//! The server exposes one working directory per connected client over a
//! persistent TCP stream. A client navigates and manipulates that directory
//! with the verbs `cd`, `mkdir`, `rm`, `ul`, `dl` and `exit`. Every message
//! on the wire — command lines, directory listings, error reports and raw
//! file payloads alike — is an arbitrary byte sequence terminated by a
//! per-session end-of-message token that the server announces once at
//! session start.

pub mod client;
pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_command;
pub mod core_network;
pub mod core_protocol;
pub mod server;
pub mod session;

pub use crate::config::Config;
pub use crate::session::Session;
