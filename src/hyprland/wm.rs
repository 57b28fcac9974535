//! [`WindowManager`] implementation backed by Hyprland IPC.
//!
//! Hyprland reports a window's `at`/`size` without its border.  The outer
//! rect therefore grows that geometry by `general:border_size` on every
//! side, and [`move_window`](WindowManager::move_window) shrinks the
//! requested outer geometry back before dispatching.

use super::{ipc_dispatch, ipc_json, HyprlandError};
use crate::action::Rect;
use crate::geometry::ResolvedMove;
use crate::traits::WindowManager;
use log::debug;
use serde::Deserialize;
use std::fmt;

/// Hyprland-backed window manager.
///
/// No connection is opened eagerly; each method call opens a short-lived
/// IPC request.
#[derive(Debug, Default)]
pub struct HyprlandWm;

impl HyprlandWm {
    pub fn new() -> Self {
        Self
    }
}

/// A Hyprland window address such as `0x55d3c1a2b0c0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowAddress(pub String);

impl fmt::Display for WindowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of a window object from `j/activewindow` / `j/clients`.
#[derive(Debug, Deserialize)]
struct ClientJson {
    address: String,
    at: [i32; 2],
    size: [i32; 2],
}

impl ClientJson {
    fn rect(&self) -> Rect {
        Rect::new(self.at[0], self.at[1], self.size[0], self.size[1])
    }
}

/// Answer of `j/getoption <name>` for an integer option.
#[derive(Debug, Deserialize)]
struct IntOptionJson {
    int: i64,
}

fn border_size() -> Result<i32, HyprlandError> {
    let opt: IntOptionJson = ipc_json("getoption general:border_size")?;
    i32::try_from(opt.int).map_err(|_| HyprlandError::new(format!("border_size out of range: {}", opt.int)))
}

/// Parse the `j/activewindow` answer, which is `{}` when nothing has focus.
fn parse_active_window(json: serde_json::Value) -> Result<Option<ClientJson>, HyprlandError> {
    if json.as_object().map_or(true, |o| o.is_empty()) {
        return Ok(None);
    }
    serde_json::from_value(json)
        .map(Some)
        .map_err(|e| HyprlandError::new(format!("parse activewindow: {}", e)))
}

fn client(address: &WindowAddress) -> Result<ClientJson, HyprlandError> {
    let clients: Vec<ClientJson> = ipc_json("clients")?;
    clients
        .into_iter()
        .find(|c| c.address == address.0)
        .ok_or_else(|| HyprlandError::new(format!("no window with address {}", address)))
}

fn grow(r: Rect, border: i32) -> Rect {
    let both = border.saturating_mul(2);
    Rect::new(
        r.x.saturating_sub(border),
        r.y.saturating_sub(border),
        r.width.saturating_add(both),
        r.height.saturating_add(both),
    )
}

fn shrink(mv: ResolvedMove, border: i32) -> ResolvedMove {
    let both = border.saturating_mul(2);
    ResolvedMove {
        left: mv.left.saturating_add(border),
        top: mv.top.saturating_add(border),
        width: mv.width.saturating_sub(both),
        height: mv.height.saturating_sub(both),
    }
}

//  WindowManager implementation

impl WindowManager for HyprlandWm {
    type Window = WindowAddress;
    type Error = HyprlandError;

    fn foreground_window(&self) -> Result<Option<WindowAddress>, Self::Error> {
        let json: serde_json::Value = ipc_json("activewindow")?;
        Ok(parse_active_window(json)?.map(|c| WindowAddress(c.address)))
    }

    fn outer_rect(&self, window: &WindowAddress) -> Result<Rect, Self::Error> {
        // With `general:border_size = 0` this equals the client rect, so every
        // snap gets the custom-chrome inset from `geometry::resolve`.
        Ok(grow(client(window)?.rect(), border_size()?))
    }

    fn client_rect(&self, window: &WindowAddress) -> Result<Rect, Self::Error> {
        Ok(client(window)?.rect())
    }

    fn move_window(&self, window: &WindowAddress, to: ResolvedMove) -> Result<(), Self::Error> {
        let inner = shrink(to, border_size()?);
        debug!("{} -> client area {:?}", window, inner);
        // Exact pixel placement only applies to floating windows.
        ipc_dispatch(&format!("setfloating address:{}", window))?;
        ipc_dispatch(&format!(
            "resizewindowpixel exact {} {},address:{}",
            inner.width, inner.height, window
        ))?;
        ipc_dispatch(&format!(
            "movewindowpixel exact {} {},address:{}",
            inner.left, inner.top, window
        ))
    }
}
