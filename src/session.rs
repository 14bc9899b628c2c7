use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::constants::ERROR_MARKER;
use crate::core_command::{cd, listing, mkdir, rm, transfer};
use crate::core_command::{Command, CommandError};
use crate::core_protocol::{framing, EofToken, ProtocolError};

/// Server side of one accepted connection.
///
/// A session owns its stream, its end-of-message token and its working
/// directory exclusively; nothing is shared between sessions, so two
/// clients navigating concurrently never observe each other's state.
pub struct Session<S> {
    stream: S,
    eof_token: EofToken,
    working_directory: PathBuf,
    chunk_size: usize,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a session rooted at `root_dir`, with a freshly generated
    /// end-of-message token.
    pub fn new(stream: S, root_dir: PathBuf, chunk_size: usize) -> Self {
        Self {
            stream,
            eof_token: EofToken::generate(),
            working_directory: root_dir,
            chunk_size,
        }
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Drives the session from handshake to termination: announce the
    /// token, send the initial directory status, then serve commands until
    /// the client sends `exit` or the stream fails.
    ///
    /// Command failures are reported to the client as `Error`-prefixed
    /// messages and the loop continues; stream failures propagate and end
    /// the session. After every command except `exit` the client receives
    /// a fresh directory status, failed commands included.
    pub async fn run(&mut self) -> Result<(), ProtocolError> {
        self.handshake().await?;

        loop {
            let raw = self.receive().await?;
            let line = String::from_utf8_lossy(&raw).into_owned();
            debug!("received command line: {:?}", line);

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    warn!("rejected command line {:?}: {}", line, e);
                    self.send_error(&e).await?;
                    self.send_status().await?;
                    continue;
                }
            };

            info!("dispatching {} command", command.verb());
            match command {
                Command::Exit => {
                    info!("client requested exit, closing session");
                    break;
                }
                Command::Cd(target) => {
                    match cd::handle_cd(&self.working_directory, &target).await {
                        Ok(new_dir) => self.working_directory = new_dir,
                        Err(e) => self.send_error(&e).await?,
                    }
                }
                Command::Mkdir(name) => {
                    match mkdir::handle_mkdir(&self.working_directory, &name).await {
                        Ok(new_dir) => self.working_directory = new_dir,
                        Err(e) => self.send_error(&e).await?,
                    }
                }
                Command::Rm(name) => match rm::handle_rm(&self.working_directory, &name).await {
                    Ok(summary) => debug!("{}", summary),
                    Err(e) => self.send_error(&e).await?,
                },
                Command::Ul(name) => {
                    // The file content follows the command line as a second
                    // framed message on the same stream.
                    let payload = self.receive().await?;
                    if let Err(e) =
                        transfer::store_file(&self.working_directory, &name, &payload).await
                    {
                        self.send_error(&e).await?;
                    }
                }
                Command::Dl(name) => {
                    match transfer::load_file(&self.working_directory, &name).await {
                        Ok(bytes) => {
                            info!("sending {} byte download of {:?}", bytes.len(), name);
                            framing::send_message(&mut self.stream, &bytes, &self.eof_token)
                                .await?;
                        }
                        Err(e) => self.send_error(&e).await?,
                    }
                }
            }

            self.send_status().await?;
        }

        Ok(())
    }

    /// Announces the session token and sends the initial directory status.
    ///
    /// The token announcement is the one message on the wire that carries
    /// no terminator: the client cannot know the delimiter before it has
    /// received it, so it reads these bytes by their fixed length.
    async fn handshake(&mut self) -> Result<(), ProtocolError> {
        self.stream.write_all(self.eof_token.as_bytes()).await?;
        self.stream.flush().await?;
        debug!("announced end-of-message token {}", self.eof_token);
        self.send_status().await
    }

    async fn receive(&mut self) -> Result<Vec<u8>, ProtocolError> {
        framing::receive_message(&mut self.stream, self.chunk_size, &self.eof_token).await
    }

    /// Sends the working-directory status. If the directory itself cannot
    /// be enumerated, the status slot carries an error message instead so
    /// the client never waits on a missing frame.
    async fn send_status(&mut self) -> Result<(), ProtocolError> {
        let info = match listing::directory_info(&self.working_directory).await {
            Ok(info) => info,
            Err(e) => {
                warn!(
                    "could not list {}: {}",
                    self.working_directory.display(),
                    e
                );
                format!(
                    "{} could not list {}: {}",
                    ERROR_MARKER,
                    self.working_directory.display(),
                    e
                )
            }
        };
        framing::send_message(&mut self.stream, info.as_bytes(), &self.eof_token).await
    }

    async fn send_error(&mut self, error: &CommandError) -> Result<(), ProtocolError> {
        warn!("command failed: {}", error);
        framing::send_message(
            &mut self.stream,
            error.to_wire_message().as_bytes(),
            &self.eof_token,
        )
        .await
    }
}
