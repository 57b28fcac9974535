//! Binding every registered action to a global hotkey.
//!
//! Binding is all-or-nothing.  If any combination is refused, every hotkey
//! bound so far is released again before the error is returned, so the
//! process never runs with only some of its hotkeys active.

use crate::action::{Action, ActionId, ActionRegistry};
use crate::traits::HotkeyBinder;
use log::{debug, info, warn};

/// A hotkey could not be claimed.
#[derive(Debug, thiserror::Error)]
#[error("failed to register hotkey {id} ({combination}): {reason}")]
pub struct BindError {
    pub id: ActionId,
    pub combination: String,
    pub reason: String,
}

/// Bind every action in `registry`, in declaration order.
pub fn bind_all<B: HotkeyBinder>(binder: &mut B, registry: &ActionRegistry) -> Result<(), BindError> {
    for (bound, action) in registry.iter().enumerate() {
        debug!("binding {} as hotkey {}", action.combination, action.id);
        if let Err(e) = binder.bind(action.id, &action.combination) {
            let err = BindError {
                id: action.id,
                combination: action.combination.to_string(),
                reason: e.to_string(),
            };
            warn!("{}; releasing {} hotkey(s) already bound", err, bound);
            release(binder, registry.iter().take(bound).rev());
            return Err(err);
        }
    }
    info!("bound {} hotkey(s)", registry.len());
    Ok(())
}

/// Release every hotkey in `registry`, in reverse declaration order.
///
/// Failures are logged and do not stop the remaining releases.
pub fn unbind_all<B: HotkeyBinder>(binder: &mut B, registry: &ActionRegistry) {
    release(binder, registry.iter().rev());
    info!("released {} hotkey(s)", registry.len());
}

fn release<'a, B: HotkeyBinder>(binder: &mut B, actions: impl Iterator<Item = &'a Action>) {
    for action in actions {
        if let Err(e) = binder.unbind(action.id, &action.combination) {
            warn!("failed to release hotkey {}: {}", action.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Rect;
    use crate::key::KeyCombination;

    #[derive(Debug, thiserror::Error)]
    #[error("hotkey already claimed")]
    struct Claimed;

    /// Records binds and unbinds; refuses the bind whose id is `fail_on`.
    #[derive(Debug, Default)]
    struct RecorderBinder {
        fail_on: Option<ActionId>,
        log: Vec<String>,
    }

    impl HotkeyBinder for RecorderBinder {
        type Error = Claimed;

        fn bind(&mut self, id: ActionId, _: &KeyCombination) -> Result<(), Claimed> {
            if self.fail_on == Some(id) {
                return Err(Claimed);
            }
            self.log.push(format!("bind {}", id));
            Ok(())
        }

        fn unbind(&mut self, id: ActionId, _: &KeyCombination) -> Result<(), Claimed> {
            self.log.push(format!("unbind {}", id));
            Ok(())
        }
    }

    fn registry(keys: &[&str]) -> ActionRegistry {
        ActionRegistry::with_actions(
            keys.iter()
                .map(|k| Action {
                    id: ActionId(0),
                    combination: KeyCombination::parse(k).unwrap(),
                    target: Rect::default(),
                })
                .collect(),
        )
    }

    #[test]
    fn binds_in_declaration_order() {
        let reg = registry(&["alt a", "alt b", "alt c"]);
        let mut binder = RecorderBinder::default();
        bind_all(&mut binder, &reg).unwrap();
        assert_eq!(binder.log, vec!["bind 1", "bind 2", "bind 3"]);
    }

    #[test]
    fn failure_releases_already_bound() {
        let reg = registry(&["alt a", "alt b", "alt c", "alt d"]);
        let mut binder = RecorderBinder {
            fail_on: Some(ActionId(3)),
            ..Default::default()
        };
        let err = bind_all(&mut binder, &reg).unwrap_err();
        assert_eq!(err.id, ActionId(3));
        assert_eq!(err.combination, "alt c");
        assert_eq!(
            binder.log,
            vec!["bind 1", "bind 2", "unbind 2", "unbind 1"]
        );
    }

    #[test]
    fn failure_on_first_releases_nothing() {
        let reg = registry(&["alt a", "alt b"]);
        let mut binder = RecorderBinder {
            fail_on: Some(ActionId(1)),
            ..Default::default()
        };
        assert!(bind_all(&mut binder, &reg).is_err());
        assert!(binder.log.is_empty());
    }

    #[test]
    fn unbind_all_reverses_order() {
        let reg = registry(&["alt a", "alt b"]);
        let mut binder = RecorderBinder::default();
        unbind_all(&mut binder, &reg);
        assert_eq!(binder.log, vec!["unbind 2", "unbind 1"]);
    }

    #[test]
    fn error_message_names_the_hotkey() {
        let reg = registry(&["win up"]);
        let mut binder = RecorderBinder {
            fail_on: Some(ActionId(1)),
            ..Default::default()
        };
        let err = bind_all(&mut binder, &reg).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to register hotkey 1 (win up): hotkey already claimed"
        );
    }
}
