//! Hyprland-specific implementations.
//!
//! This module provides concrete backends for the
//! [`WindowManager`](crate::traits::WindowManager) and
//! [`HotkeyBinder`](crate::traits::HotkeyBinder) traits, powered by
//! Hyprland's IPC command socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod binder;
pub mod wm;

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl HyprlandError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError::new("XDG_RUNTIME_DIR not set"))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError::new("HYPRLAND_INSTANCE_SIGNATURE not set"))?;
    Ok(PathBuf::from(format!("{}/hypr/{}/.socket.sock", runtime_dir, his)))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and deserialize the answer.
pub(crate) fn ipc_json<T: serde::de::DeserializeOwned>(data_command: &str) -> Result<T, HyprlandError> {
    let json = ipc_request(&format!("j/{}", data_command))?;
    serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse {}: {}", data_command, e)))
}

/// Check a command response for `"ok"`.
fn expect_ok(kind: &str, args: &str, response: String) -> Result<(), HyprlandError> {
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandError(format!("{} {}: {}", kind, args, response.trim())))
    }
}

/// Send a dispatch command and check for `"ok"`.
pub(crate) fn ipc_dispatch(args: &str) -> Result<(), HyprlandError> {
    expect_ok("dispatch", args, ipc_request(&format!("/dispatch {}", args))?)
}

/// Set a config keyword at runtime and check for `"ok"`.
pub(crate) fn ipc_keyword(args: &str) -> Result<(), HyprlandError> {
    expect_ok("keyword", args, ipc_request(&format!("/keyword {}", args))?)
}
