//! Action configuration.
//!
//! The configuration is a JSON document with a single `actions` array.
//! Each entry names a key combination and the rectangle the focused window
//! should snap to:
//!
//! ```json
//! {
//!   "actions": [
//!     { "key": "alt win up",   "rect": [0, 0, 1280, 1024] },
//!     { "key": "alt win left", "rect": [0, 0, 640, 1024] }
//!   ]
//! }
//! ```
//!
//! Loading is all-or-nothing: the first invalid entry aborts the load and no
//! actions are produced.  Unknown fields are ignored.

use crate::action::{Action, ActionId, Rect};
use crate::key::{KeyCombination, KeyTokenError};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Error from loading or validating a configuration.
///
/// `index` is always the zero-based position in the `actions` array.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration is empty")]
    Empty,
    #[error("configuration is invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("configuration is not an object at the root")]
    RootNotObject,
    #[error("configuration does not contain an 'actions' array")]
    MissingActionsArray,
    #[error("action {0} is not an object")]
    ActionNotObject(usize),
    #[error("action {0} does not have a 'key' string value")]
    MissingKey(usize),
    #[error("action {0} has an empty key string")]
    EmptyKey(usize),
    #[error("action {index} has an unknown key element: {token}")]
    UnknownKeyToken { index: usize, token: String },
    #[error("action {0} did not provide an actual key to press")]
    NoKeySpecified(usize),
    #[error("action {0} does not have a 'rect' array value")]
    MissingRect(usize),
    #[error("action {0} 'rect' array doesn't have 4 values")]
    RectWrongSize(usize),
    #[error("action {0} has a non-integer for rect index {1}")]
    RectElementNotNumber(usize, usize),
    #[error("action {index} uses the same key combination as action {previous}")]
    DuplicateCombination { index: usize, previous: usize },
}

/// Parse configuration text into actions, in declaration order.
///
/// Ids are assigned `1..=N` by position.
pub fn parse(text: &str) -> Result<Vec<Action>, ConfigError> {
    if text.trim().is_empty() {
        return Err(ConfigError::Empty);
    }
    let root: Value = serde_json::from_str(text)?;
    let root = root.as_object().ok_or(ConfigError::RootNotObject)?;
    let entries = root
        .get("actions")
        .and_then(Value::as_array)
        .ok_or(ConfigError::MissingActionsArray)?;

    let mut actions = Vec::with_capacity(entries.len());
    let mut seen: HashMap<KeyCombination, usize> = HashMap::new();

    for (index, entry) in entries.iter().enumerate() {
        let obj = entry.as_object().ok_or(ConfigError::ActionNotObject(index))?;
        let combination = parse_key(index, obj)?;
        let target = parse_rect(index, obj)?;

        if let Some(&previous) = seen.get(&combination) {
            return Err(ConfigError::DuplicateCombination { index, previous });
        }
        seen.insert(combination.clone(), index);

        debug!("action {}: {} -> {:?}", index, combination, target);
        actions.push(Action {
            id: ActionId(index as u32 + 1),
            combination,
            target,
        });
    }

    Ok(actions)
}

/// Alias of [`parse`] under the name the rest of the daemon uses.
pub fn load_configuration(text: &str) -> Result<Vec<Action>, ConfigError> {
    parse(text)
}

fn parse_key(index: usize, obj: &Map<String, Value>) -> Result<KeyCombination, ConfigError> {
    let key = obj
        .get("key")
        .and_then(Value::as_str)
        .ok_or(ConfigError::MissingKey(index))?;
    KeyCombination::parse(key).map_err(|e| match e {
        KeyTokenError::Empty => ConfigError::EmptyKey(index),
        KeyTokenError::UnknownToken(token) => ConfigError::UnknownKeyToken { index, token },
        KeyTokenError::NoKey => ConfigError::NoKeySpecified(index),
    })
}

fn parse_rect(index: usize, obj: &Map<String, Value>) -> Result<Rect, ConfigError> {
    let values = obj
        .get("rect")
        .and_then(Value::as_array)
        .ok_or(ConfigError::MissingRect(index))?;
    if values.len() != 4 {
        return Err(ConfigError::RectWrongSize(index));
    }
    let mut nums = [0i32; 4];
    for (position, value) in values.iter().enumerate() {
        nums[position] =
            integer_value(value).ok_or(ConfigError::RectElementNotNumber(index, position))?;
    }
    let [x, y, width, height] = nums;
    Ok(Rect { x, y, width, height })
}

/// Accept JSON integers, and floats with no fractional part, that fit in
/// an `i32`.
fn integer_value(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// Loaded configuration file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub actions: Vec<Action>,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_text(&contents)
    }

    pub fn from_text(text: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            actions: parse(text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Key, Modifier};

    fn wrap(actions: &str) -> String {
        format!(r#"{{ "actions": [{}] }}"#, actions)
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "actions": [
                { "key": "alt win up", "rect": [0, 0, 1280, 1024] },
                { "key": "ctrl shift space", "rect": [-1280, 10, 640, 480] }
            ]
        }"#;
        let actions = parse(json).unwrap();
        assert_eq!(actions.len(), 2);

        assert_eq!(actions[0].id, ActionId(1));
        assert_eq!(
            actions[0].combination,
            KeyCombination::new([Modifier::Alt, Modifier::Win], Key::Up)
        );
        assert_eq!(actions[0].target, Rect::new(0, 0, 1280, 1024));

        assert_eq!(actions[1].id, ActionId(2));
        assert_eq!(
            actions[1].combination,
            KeyCombination::new([Modifier::Control, Modifier::Shift], Key::Space)
        );
        assert_eq!(actions[1].target, Rect::new(-1280, 10, 640, 480));
    }

    #[test]
    fn parsing_is_deterministic() {
        let json = wrap(
            r#"{ "key": "alt win up", "rect": [0, 0, 1280, 1024] },
               { "key": "alt win down", "rect": [0, 1024, 1280, 1024] }"#,
        );
        assert_eq!(parse(&json).unwrap(), parse(&json).unwrap());
    }

    #[test]
    fn ids_are_dense() {
        let entries: Vec<String> = (0..9)
            .map(|i| format!(r#"{{ "key": "alt {}", "rect": [0, 0, 1, 1] }}"#, i))
            .collect();
        let actions = parse(&wrap(&entries.join(","))).unwrap();
        let ids: Vec<u32> = actions.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn empty_actions_array_is_valid() {
        assert!(parse(r#"{ "actions": [] }"#).unwrap().is_empty());
    }

    #[test]
    fn unknown_fields_ignored() {
        let json = r#"{
            "comment": "hi",
            "actions": [{ "key": "alt up", "rect": [1, 2, 3, 4], "note": 5 }]
        }"#;
        assert_eq!(parse(json).unwrap().len(), 1);
    }

    #[test]
    fn empty_text() {
        assert!(matches!(parse(""), Err(ConfigError::Empty)));
        assert!(matches!(parse("  \n"), Err(ConfigError::Empty)));
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(parse("{ actions"), Err(ConfigError::InvalidJson(_))));
    }

    #[test]
    fn root_not_object() {
        assert!(matches!(parse("[]"), Err(ConfigError::RootNotObject)));
        assert!(matches!(parse("42"), Err(ConfigError::RootNotObject)));
    }

    #[test]
    fn missing_actions_array() {
        assert!(matches!(parse("{}"), Err(ConfigError::MissingActionsArray)));
        assert!(matches!(
            parse(r#"{ "actions": {} }"#),
            Err(ConfigError::MissingActionsArray)
        ));
    }

    #[test]
    fn action_not_object() {
        let json = wrap(r#"{ "key": "alt up", "rect": [0, 0, 1, 1] }, "nope""#);
        assert!(matches!(parse(&json), Err(ConfigError::ActionNotObject(1))));
    }

    #[test]
    fn missing_or_non_string_key() {
        assert!(matches!(
            parse(&wrap(r#"{ "rect": [0, 0, 1, 1] }"#)),
            Err(ConfigError::MissingKey(0))
        ));
        assert!(matches!(
            parse(&wrap(r#"{ "key": 5, "rect": [0, 0, 1, 1] }"#)),
            Err(ConfigError::MissingKey(0))
        ));
    }

    #[test]
    fn empty_key() {
        assert!(matches!(
            parse(&wrap(r#"{ "key": "", "rect": [0, 0, 1, 1] }"#)),
            Err(ConfigError::EmptyKey(0))
        ));
    }

    #[test]
    fn unknown_key_token_aborts_load() {
        let json = wrap(
            r#"{ "key": "alt up", "rect": [0, 0, 1, 1] },
               { "key": "alt foobar", "rect": [0, 0, 1, 1] }"#,
        );
        match parse(&json) {
            Err(ConfigError::UnknownKeyToken { index, token }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "foobar");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn doubled_space_in_key_aborts_load() {
        let json = wrap(r#"{ "key": "alt  up", "rect": [0, 0, 1, 1] }"#);
        match parse(&json) {
            Err(ConfigError::UnknownKeyToken { index, token }) => {
                assert_eq!(index, 0);
                assert!(token.is_empty());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn modifiers_only() {
        assert!(matches!(
            parse(&wrap(r#"{ "key": "alt win", "rect": [0, 0, 1, 1] }"#)),
            Err(ConfigError::NoKeySpecified(0))
        ));
    }

    #[test]
    fn missing_rect_fails_whole_load() {
        let json = wrap(
            r#"{ "key": "alt up", "rect": [0, 0, 1, 1] },
               { "key": "alt down" }"#,
        );
        assert!(matches!(parse(&json), Err(ConfigError::MissingRect(1))));
    }

    #[test]
    fn rect_not_array() {
        assert!(matches!(
            parse(&wrap(r#"{ "key": "alt up", "rect": "0 0 1 1" }"#)),
            Err(ConfigError::MissingRect(0))
        ));
    }

    #[test]
    fn rect_wrong_size() {
        assert!(matches!(
            parse(&wrap(r#"{ "key": "alt up", "rect": [1, 2, 3] }"#)),
            Err(ConfigError::RectWrongSize(0))
        ));
        assert!(matches!(
            parse(&wrap(r#"{ "key": "alt up", "rect": [1, 2, 3, 4, 5] }"#)),
            Err(ConfigError::RectWrongSize(0))
        ));
    }

    #[test]
    fn rect_element_not_number() {
        assert!(matches!(
            parse(&wrap(r#"{ "key": "alt up", "rect": [1, "2", 3, 4] }"#)),
            Err(ConfigError::RectElementNotNumber(0, 1))
        ));
        assert!(matches!(
            parse(&wrap(r#"{ "key": "alt up", "rect": [1, 2, 3.5, 4] }"#)),
            Err(ConfigError::RectElementNotNumber(0, 2))
        ));
        assert!(matches!(
            parse(&wrap(r#"{ "key": "alt up", "rect": [1, 2, 3, 4294967296] }"#)),
            Err(ConfigError::RectElementNotNumber(0, 3))
        ));
    }

    #[test]
    fn integral_floats_accepted() {
        let actions = parse(&wrap(r#"{ "key": "alt up", "rect": [0.0, -10.0, 800, 600] }"#)).unwrap();
        assert_eq!(actions[0].target, Rect::new(0, -10, 800, 600));
    }

    #[test]
    fn duplicate_combination_rejected() {
        let json = wrap(
            r#"{ "key": "alt win up", "rect": [0, 0, 1, 1] },
               { "key": "alt down", "rect": [0, 0, 1, 1] },
               { "key": "win alt up", "rect": [5, 5, 1, 1] }"#,
        );
        assert!(matches!(
            parse(&json),
            Err(ConfigError::DuplicateCombination { index: 2, previous: 0 })
        ));
    }

    #[test]
    fn error_messages_name_the_action() {
        let err = parse(&wrap(r#"{ "key": "alt up", "rect": [1, 2, 3] }"#)).unwrap_err();
        assert_eq!(err.to_string(), "action 0 'rect' array doesn't have 4 values");
    }

    #[test]
    fn load_missing_file() {
        let path = std::env::temp_dir().join(format!("there-missing-{}.json", std::process::id()));
        assert!(matches!(Config::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("there-config-{}.json", std::process::id()));
        std::fs::write(&path, wrap(r#"{ "key": "alt up", "rect": [0, 0, 1, 1] }"#)).unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.actions.len(), 1);
        let _ = std::fs::remove_file(&path);
    }
}
