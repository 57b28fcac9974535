//! [`HotkeyBinder`] implementation backed by Hyprland keywords.
//!
//! Each action becomes a runtime `bind` whose dispatcher execs this binary
//! with `activate <id>`, which forwards the activation to the daemon's
//! socket.  Hyprland silently accepts duplicate binds, so existing binds
//! are checked first and an already-claimed combination is refused.

use super::{ipc_json, ipc_keyword, HyprlandError};
use crate::action::ActionId;
use crate::key::{Key, KeyCombination, Modifier};
use crate::traits::HotkeyBinder;
use serde::Deserialize;
use std::path::Path;

// Modifier mask bits as reported by `j/binds`.
const MASK_SHIFT: u32 = 1 << 0;
const MASK_CTRL: u32 = 1 << 2;
const MASK_ALT: u32 = 1 << 3;
const MASK_SUPER: u32 = 1 << 6;

/// Installs one Hyprland bind per action.
#[derive(Debug, Clone)]
pub struct HyprlandBinder {
    activate_command: String,
}

impl HyprlandBinder {
    /// `exe` is the binary the binds exec; usually `std::env::current_exe()`.
    pub fn new(exe: impl AsRef<Path>) -> Self {
        Self {
            activate_command: format!("{} activate", shell_quote(&exe.as_ref().display().to_string())),
        }
    }

    fn exec_line(&self, id: ActionId) -> String {
        format!("{} {}", self.activate_command, id)
    }
}

/// Single-quote `s` for `sh -c`; embedded quotes become `'\''`.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Subset of a bind object from `j/binds`.
#[derive(Debug, Deserialize)]
struct BindJson {
    modmask: u32,
    key: String,
}

fn modifier_name(m: Modifier) -> &'static str {
    match m {
        Modifier::Win => "SUPER",
        Modifier::Alt => "ALT",
        Modifier::Control => "CTRL",
        Modifier::Shift => "SHIFT",
    }
}

fn modifier_mask(combination: &KeyCombination) -> u32 {
    combination
        .modifiers()
        .map(|m| match m {
            Modifier::Win => MASK_SUPER,
            Modifier::Alt => MASK_ALT,
            Modifier::Control => MASK_CTRL,
            Modifier::Shift => MASK_SHIFT,
        })
        .fold(0, |acc, bit| acc | bit)
}

/// The xkb keysym name Hyprland expects for `key`.
fn key_name(key: Key) -> String {
    let name = match key {
        Key::Up => "Up",
        Key::Down => "Down",
        Key::Left => "Left",
        Key::Right => "Right",
        Key::Space => "space",
        Key::Char(',') => "comma",
        Key::Char('.') => "period",
        Key::Char('/') => "slash",
        Key::Char('\\') => "backslash",
        Key::Char(';') => "semicolon",
        Key::Char('\'') => "apostrophe",
        Key::Char('[') => "bracketleft",
        Key::Char(']') => "bracketright",
        Key::Char('-') => "minus",
        Key::Char('=') => "equal",
        Key::Char('`') => "grave",
        Key::Char(c) => return c.to_string(),
    };
    name.to_string()
}

/// `MODS,KEY` as used by `bind` / `unbind`.
fn chord_spec(combination: &KeyCombination) -> String {
    let mods: Vec<&str> = combination.modifiers().map(modifier_name).collect();
    format!("{},{}", mods.join(" "), key_name(combination.key()))
}

fn is_claimed(existing: &[BindJson], combination: &KeyCombination) -> bool {
    let mask = modifier_mask(combination);
    let key = key_name(combination.key());
    existing
        .iter()
        .any(|b| b.modmask == mask && b.key.eq_ignore_ascii_case(&key))
}

impl HotkeyBinder for HyprlandBinder {
    type Error = HyprlandError;

    fn bind(&mut self, id: ActionId, combination: &KeyCombination) -> Result<(), Self::Error> {
        let existing: Vec<BindJson> = ipc_json("binds")?;
        if is_claimed(&existing, combination) {
            return Err(HyprlandError::new(format!(
                "{} is already bound",
                chord_spec(combination)
            )));
        }
        ipc_keyword(&format!("bind {},exec,{}", chord_spec(combination), self.exec_line(id)))
    }

    fn unbind(&mut self, _id: ActionId, combination: &KeyCombination) -> Result<(), Self::Error> {
        ipc_keyword(&format!("unbind {}", chord_spec(combination)))
    }
}
