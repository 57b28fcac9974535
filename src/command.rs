//! Commands delivered to the running daemon.
//!
//! Commands arrive over a [`CommandSource`](crate::traits::CommandSource),
//! one JSON value per line:
//!
//! ```json
//! {"Activate":3}
//! "Quit"
//! ```

use crate::action::ActionId;
use serde::{Deserialize, Serialize};

/// Everything the daemon can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A bound hotkey fired: snap the foreground window for this action.
    Activate(ActionId),

    /// Stop the event loop.  The daemon releases its hotkeys on the way out.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_wire_format() {
        let cmd = Command::Activate(ActionId(3));
        assert_eq!(serde_json::to_string(&cmd).unwrap(), r#"{"Activate":3}"#);
        let back: Command = serde_json::from_str(r#"{"Activate":3}"#).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn quit_wire_format() {
        let cmd: Command = serde_json::from_str(r#""Quit""#).unwrap();
        assert_eq!(cmd, Command::Quit);
    }

    #[test]
    fn negative_id_rejected() {
        assert!(serde_json::from_str::<Command>(r#"{"Activate":-1}"#).is_err());
    }
}
