//! Command-line interface.
//!
//! Without a subcommand the daemon runs with the default configuration
//! path.  Missing values and unknown flags are rejected by clap instead of
//! falling through to the daemon.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "there")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Mode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Bind the configured hotkeys and process activations (default)
    Run {
        /// Path to the action configuration
        /// (default: $XDG_CONFIG_HOME/there/there.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Forward an activation to the running daemon
    Activate {
        /// Action id, 1-based in declaration order
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,
    },

    /// Ask the running daemon to release its hotkeys and exit
    Quit,

    /// Print the focused window's rect as a config line
    Describe,
}

impl Cli {
    /// The selected mode, defaulting to [`Mode::Run`].
    pub fn mode(self) -> Mode {
        self.command.unwrap_or(Mode::Run { config: None })
    }
}
