//! Actions and the registry that owns them.
//!
//! An [`Action`] pairs a [`KeyCombination`] with a target [`Rect`].  Actions
//! are created once from the configuration and never change afterwards.
//! The [`ActionRegistry`] hands out dense, 1-based [`ActionId`]s in
//! declaration order, so resolving an activation is a direct index.

use crate::key::KeyCombination;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an action, and of the global hotkey bound for it.
///
/// Ids are assigned by declaration order starting at `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl ActionId {
    /// Zero-based position of the action in the configuration.
    pub fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An axis-aligned rectangle in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// `true` if both rectangles have the same width and height, ignoring
    /// their position.
    pub fn same_size(&self, other: &Rect) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// A hotkey and the rectangle the focused window snaps to when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: ActionId,
    pub combination: KeyCombination,
    pub target: Rect,
}

/// Resolution failure.  Seeing this means the activation source delivered
/// an id that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no action registered for id {id} (have {len})")]
    NotFound { id: ActionId, len: usize },
}

/// Owns the action list for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: Vec<Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry that already holds `actions`.
    pub fn with_actions(actions: Vec<Action>) -> Self {
        let mut registry = Self::new();
        registry.register(actions);
        registry
    }

    /// Replace the current action set.
    ///
    /// Ids are rewritten to the 1-based declaration positions so the
    /// registry's `1..=N` density holds regardless of what the caller passed.
    pub fn register(&mut self, actions: Vec<Action>) {
        self.actions = actions
            .into_iter()
            .enumerate()
            .map(|(i, mut action)| {
                action.id = ActionId(i as u32 + 1);
                action
            })
            .collect();
    }

    /// Visit every action in declaration order.
    pub fn for_each<F: FnMut(&Action)>(&self, f: F) {
        self.actions.iter().for_each(f);
    }

    /// Iterate over actions in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Look up the action bound to `id`.
    pub fn resolve(&self, id: ActionId) -> Result<&Action, RegistryError> {
        self.actions.get(id.index()).ok_or(RegistryError::NotFound {
            id,
            len: self.actions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActionRegistry {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
