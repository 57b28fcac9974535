//! Seams between the snapping logic and the operating system.
//!
//! Each concrete backend (Hyprland IPC, a Unix-socket listener, a test
//! double, …) implements one of these traits.  Nothing in
//! [`Snapper`](crate::snapper::Snapper) or [`binding`](crate::binding)
//! depends on a specific backend.

use crate::action::{ActionId, Rect};
use crate::command::Command;
use crate::geometry::ResolvedMove;
use crate::key::KeyCombination;
use std::fmt;
use std::sync::mpsc;

/// Query and move windows.
///
/// An implementation might talk to a compositor over IPC, or it might be a
/// recorder used in tests.
pub trait WindowManager {
    /// Opaque handle identifying one window.
    type Window: Clone + PartialEq + fmt::Debug;

    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return the window that currently has keyboard focus, or `None` if no
    /// window is focused.
    fn foreground_window(&self) -> Result<Option<Self::Window>, Self::Error>;

    /// Full bounding rectangle of `window`, including any decorations.
    fn outer_rect(&self, window: &Self::Window) -> Result<Rect, Self::Error>;

    /// Interior drawable area of `window`.  Only its size is meaningful.
    fn client_rect(&self, window: &Self::Window) -> Result<Rect, Self::Error>;

    /// Move and resize `window`.
    fn move_window(&self, window: &Self::Window, to: ResolvedMove) -> Result<(), Self::Error>;
}

/// Install and remove global hotkeys.
///
/// When a bound combination fires, the backend arranges for
/// [`Command::Activate`] with the same id to reach the daemon.
pub trait HotkeyBinder {
    /// The error type produced by this binder.
    type Error: std::error::Error + Send + 'static;

    /// Claim `combination` globally under `id`.
    ///
    /// Fails if the combination is already claimed elsewhere or the
    /// backend refuses it.
    fn bind(&mut self, id: ActionId, combination: &KeyCombination) -> Result<(), Self::Error>;

    /// Release a combination previously claimed with [`bind`](Self::bind).
    fn unbind(&mut self, id: ActionId, combination: &KeyCombination) -> Result<(), Self::Error>;
}

/// A source of [`Command`]s.
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command is sent through `sink` exactly once.
/// * Implementations are [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    /// A test double that emits a fixed sequence of commands.
    struct MockSource {
        commands: Vec<Command>,
    }

    impl CommandSource for MockSource {
        type Error = MockError;

        fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), MockError> {
            for cmd in self.commands.drain(..) {
                let _ = sink.send(cmd);
            }
            Ok(())
        }
    }

    #[test]
    fn mock_source_emits_commands() {
        let mut src = MockSource {
            commands: vec![Command::Activate(ActionId(2)), Command::Quit],
        };
        let (tx, rx) = mpsc::channel();
        src.run(tx).unwrap();
        let cmds: Vec<Command> = rx.try_iter().collect();
        assert_eq!(cmds, vec![Command::Activate(ActionId(2)), Command::Quit]);
    }
}
