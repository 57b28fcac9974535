//! IPC between the daemon and the processes Hyprland execs for hotkeys.
//!
//! Hotkey binds (and scripts) connect to the daemon's Unix socket and send
//! newline-delimited JSON commands.

pub mod listener;
