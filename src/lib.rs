//! **there** — snap the focused window into a predefined rectangle with a
//! global hotkey.
//!
//! # Architecture
//!
//! * [`config`] parses the `actions` list into [`action::Action`]s, each a
//!   [`key::KeyCombination`] plus a target [`action::Rect`].
//! * [`action::ActionRegistry`] owns the actions and resolves an activation
//!   id back to its action by direct index.
//! * [`binding`] claims one global hotkey per action, all or nothing.
//! * [`snapper::Snapper`] handles activations: it resolves the action,
//!   skips our own window and computes the move with [`geometry::resolve`].
//!
//! The operating system is reached only through the traits in [`traits`].
//! Concrete implementations live in [`hyprland`] (Hyprland IPC) and
//! [`ipc`] (Unix-socket command listener).

pub mod action;
pub mod binding;
pub mod cli;
pub mod command;
pub mod config;
pub mod geometry;
pub mod hyprland;
pub mod ipc;
pub mod key;
pub mod snapper;
pub mod traits;
