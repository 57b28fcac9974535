//! Key combinations and the token grammar used by the `key` field.
//!
//! A combination is a set of modifiers plus exactly one main key.  It is
//! built from a space-separated token string such as `"alt win up"`:
//!
//! | token(s)                               | effect                  |
//! |----------------------------------------|-------------------------|
//! | `win`                                  | add [`Modifier::Win`]     |
//! | `alt`                                  | add [`Modifier::Alt`]     |
//! | `ctrl`, `ctl`, `control`               | add [`Modifier::Control`] |
//! | `shift`                                | add [`Modifier::Shift`]   |
//! | `up`, `down`, `left`, `right`, `space` | set a named key         |
//! | any other single character             | set that character      |
//!
//! Tokens are separated by single spaces and are case-sensitive, so a
//! doubled space yields an empty (unknown) token.  Modifier order does not
//! matter and repeated modifiers collapse.  If more than one key token
//! appears, the last one wins.

use std::collections::BTreeSet;
use std::fmt;

/// A modifier key that can take part in a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Win,
    Alt,
    Control,
    Shift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Win => write!(f, "win"),
            Modifier::Alt => write!(f, "alt"),
            Modifier::Control => write!(f, "ctrl"),
            Modifier::Shift => write!(f, "shift"),
        }
    }
}

/// The main (non-modifier) key of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    /// A single printable character, exactly as written in the config.
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Space => write!(f, "space"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

/// What a single token contributes to a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Modifier(Modifier),
    Key(Key),
}

fn parse_token(token: &str) -> Option<Token> {
    let parsed = match token {
        "win" => Token::Modifier(Modifier::Win),
        "alt" => Token::Modifier(Modifier::Alt),
        "ctrl" | "ctl" | "control" => Token::Modifier(Modifier::Control),
        "shift" => Token::Modifier(Modifier::Shift),
        "up" => Token::Key(Key::Up),
        "down" => Token::Key(Key::Down),
        "left" => Token::Key(Key::Left),
        "right" => Token::Key(Key::Right),
        "space" => Token::Key(Key::Space),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Token::Key(Key::Char(c)),
                _ => return None,
            }
        }
    };
    Some(parsed)
}

/// Reasons a token string does not describe a combination.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyTokenError {
    /// The string contained no tokens at all.
    #[error("empty key string")]
    Empty,
    /// A token that is neither a modifier, a named key nor a single
    /// character.  Includes the empty token left by a doubled space.
    #[error("unknown key element: {0}")]
    UnknownToken(String),
    /// Only modifiers were given.
    #[error("no actual key to press")]
    NoKey,
}

/// A set of modifiers plus one main key.
///
/// Equality and hashing consider the modifier *set*, so `"alt win up"` and
/// `"win alt up"` produce equal combinations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    modifiers: BTreeSet<Modifier>,
    key: Key,
}

impl KeyCombination {
    /// Build a combination directly.  Duplicate modifiers collapse.
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: Key) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            key,
        }
    }

    /// Parse a space-separated token string.
    ///
    /// A single trailing space is tolerated; any other empty piece is an
    /// unknown token.
    pub fn parse(s: &str) -> Result<Self, KeyTokenError> {
        if s.is_empty() {
            return Err(KeyTokenError::Empty);
        }
        let s = s.strip_suffix(' ').unwrap_or(s);
        Self::from_tokens(s.split(' '))
    }

    /// Build a combination from an already-split token sequence.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Self, KeyTokenError> {
        let mut modifiers = BTreeSet::new();
        let mut key = None;
        let mut seen_any = false;

        for token in tokens {
            seen_any = true;
            match parse_token(token) {
                Some(Token::Modifier(m)) => {
                    modifiers.insert(m);
                }
                Some(Token::Key(k)) => key = Some(k),
                None => return Err(KeyTokenError::UnknownToken(token.to_string())),
            }
        }

        if !seen_any {
            return Err(KeyTokenError::Empty);
        }
        let key = key.ok_or(KeyTokenError::NoKey)?;
        Ok(Self { modifiers, key })
    }

    /// Modifiers in a fixed order (win, alt, control, shift).
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.modifiers.iter().copied()
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn key(&self) -> Key {
        self.key
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{} ", m)?;
        }
        write!(f, "{}", self.key)
    }
}
