//! Unix-socket [`CommandSource`] and its client.
//!
//! The daemon claims its socket with [`UnixSocketListener::bind`] before
//! it touches any hotkey.  If another daemon already answers on the path,
//! startup fails and the existing socket is left alone; a file nobody
//! answers on is treated as stale and replaced.
//!
//! Every message is one line of JSON:
//!
//! ```json
//! {"Activate":1}
//! "Quit"
//! ```

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, info, warn};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Errors produced by the socket listener and client.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("another instance is already listening on {0}")]
    InUse(PathBuf),
    #[error("socket io: {0}")]
    Io(#[from] std::io::Error),
    #[error("command encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// A bound command socket.
pub struct UnixSocketListener {
    path: PathBuf,
    listener: UnixListener,
}

impl UnixSocketListener {
    /// Claim `path`, refusing if a live daemon answers there.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self, UnixSocketError> {
        let path = path.as_ref().to_path_buf();
        if UnixStream::connect(&path).is_ok() {
            return Err(UnixSocketError::InUse(path));
        }
        if path.exists() {
            warn!("replacing stale socket {}", path.display());
            std::fs::remove_file(&path)?;
        }
        let listener = UnixListener::bind(&path)?;
        info!("listening on {}", path.display());
        Ok(Self { path, listener })
    }

    /// The filesystem path of the socket.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Forward every command on one connection.  Returns `false` once the sink
/// is gone.
fn forward(stream: UnixStream, sink: &mpsc::Sender<Command>) -> bool {
    for line in BufReader::new(stream).lines() {
        let text = match line {
            Ok(text) => text,
            Err(e) => {
                warn!("read error: {}", e);
                break;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Command>(&text) {
            Ok(cmd) => {
                debug!("received {:?}", cmd);
                if sink.send(cmd).is_err() {
                    return false;
                }
            }
            Err(e) => warn!("ignoring malformed command {:?}: {}", text, e),
        }
    }
    true
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Accept connections until the sink is dropped.  Blocks; run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        for stream in self.listener.incoming() {
            if !forward(stream?, &sink) {
                info!("sink closed, listener stopping");
                break;
            }
        }
        Ok(())
    }
}

/// Send one command to the daemon listening at `path`.
pub fn send_command(path: impl AsRef<Path>, cmd: &Command) -> Result<(), UnixSocketError> {
    let mut stream = UnixStream::connect(path.as_ref())?;
    writeln!(stream, "{}", serde_json::to_string(cmd)?)?;
    stream.shutdown(std::net::Shutdown::Write)?;
    Ok(())
}
