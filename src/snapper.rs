//! The orchestrator that turns activations into window moves.
//!
//! [`Snapper`] owns the [`ActionRegistry`] and a [`WindowManager`].  For
//! each activation it resolves the action, checks the foreground window,
//! computes the destination with [`geometry::resolve`] and applies it.

use crate::action::{ActionId, ActionRegistry, RegistryError};
use crate::geometry::{self, ResolvedMove};
use crate::traits::WindowManager;
use log::{debug, info, warn};

/// Possible errors from the snapper.
#[derive(Debug, thiserror::Error)]
pub enum SnapperError {
    /// The activation id does not belong to any registered action.
    #[error(transparent)]
    Unresolved(#[from] RegistryError),

    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),
}

/// What an activation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapOutcome {
    /// The foreground window was moved.
    Moved(ResolvedMove),
    /// Nothing has focus.
    NoForegroundWindow,
    /// The foreground window is our own; it is never moved.
    OwnWindow,
}

/// Resolves activations against a fixed action set.
///
/// The registry is handed over at construction and never modified
/// afterwards.
pub struct Snapper<W: WindowManager> {
    wm: W,
    registry: ActionRegistry,
    own_window: Option<W::Window>,
}

impl<W: WindowManager> Snapper<W> {
    pub fn new(wm: W, registry: ActionRegistry) -> Self {
        Self {
            wm,
            registry,
            own_window: None,
        }
    }

    /// Set the window that belongs to this process.  Activations while it
    /// has focus are ignored.
    pub fn set_own_window(&mut self, window: W::Window) {
        self.own_window = Some(window);
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn window_manager(&self) -> &W {
        &self.wm
    }

    /// Snap the foreground window to the rectangle of action `id`.
    pub fn activate(&self, id: ActionId) -> Result<SnapOutcome, SnapperError> {
        let action = self.registry.resolve(id)?;

        let window = match self.foreground()? {
            Some(w) => w,
            None => {
                debug!("hotkey {}: no foreground window", id);
                return Ok(SnapOutcome::NoForegroundWindow);
            }
        };
        if self.is_own(&window) {
            debug!("hotkey {}: foreground window is our own, ignoring", id);
            return Ok(SnapOutcome::OwnWindow);
        }

        let outer = self.wm.outer_rect(&window).map_err(wm_err)?;
        let client = self.wm.client_rect(&window).map_err(wm_err)?;
        if geometry::has_custom_chrome(&outer, &client) {
            debug!("{:?} draws its own chrome ({:?}), compensating", window, outer);
        }
        let to = geometry::resolve(action.target, outer, client);

        info!(
            "hotkey {} ({}): moving {:?} to {},{} {}x{}",
            id, action.combination, window, to.left, to.top, to.width, to.height
        );
        self.wm.move_window(&window, to).map_err(wm_err)?;
        Ok(SnapOutcome::Moved(to))
    }

    /// Render the foreground window's outer rect as a config line.
    ///
    /// Returns `None` if nothing has focus or our own window does.
    pub fn describe_foreground(&self) -> Result<Option<String>, SnapperError> {
        let window = match self.foreground()? {
            Some(w) if !self.is_own(&w) => w,
            _ => return Ok(None),
        };
        let outer = self.wm.outer_rect(&window).map_err(wm_err)?;
        Ok(Some(geometry::config_snippet(&outer)))
    }

    fn foreground(&self) -> Result<Option<W::Window>, SnapperError> {
        self.wm.foreground_window().map_err(wm_err)
    }

    fn is_own(&self, window: &W::Window) -> bool {
        self.own_window.as_ref() == Some(window)
    }
}

/// Log an activation failure.  Unknown ids are reported but never fatal.
pub fn report(id: ActionId, err: &SnapperError) {
    match err {
        SnapperError::Unresolved(e) => warn!("ignoring activation: {}", e),
        SnapperError::WindowManager(_) => warn!("hotkey {} failed: {}", id, err),
    }
}

fn wm_err<E: std::error::Error>(e: E) -> SnapperError {
    SnapperError::WindowManager(e.to_string())
}
