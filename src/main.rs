//! Entry point for **there**.
//!
//! Without a subcommand (or with `run`) the daemon loads the action list,
//! claims its Unix socket, binds one Hyprland hotkey per action and
//! processes activations on the main thread.  Any configuration, socket or
//! binding failure stops it before the event loop starts.  See
//! [`there::cli`] for the other modes.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;
use there::action::{ActionId, ActionRegistry};
use there::binding::{bind_all, unbind_all};
use there::cli::{Cli, Mode};
use there::command::Command;
use there::config::Config;
use there::hyprland::binder::HyprlandBinder;
use there::hyprland::wm::HyprlandWm;
use there::ipc::listener::{send_command, UnixSocketListener};
use there::snapper::{self, Snapper};
use there::traits::CommandSource;

/// Default socket path for the command listener.
fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("there.sock")
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/there`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("there")
}

//  Main

fn main() {
    env_logger::init();

    match Cli::parse().mode() {
        Mode::Run { config } => {
            run_daemon(config.unwrap_or_else(|| config_dir().join("there.json")))
        }
        Mode::Activate { id } => send_or_exit(Command::Activate(ActionId(id))),
        Mode::Quit => send_or_exit(Command::Quit),
        Mode::Describe => run_describe(),
    }
}

fn send_or_exit(cmd: Command) {
    let path = default_socket_path();
    if let Err(e) = send_command(&path, &cmd) {
        error!("cannot reach daemon at {}: {}", path.display(), e);
        std::process::exit(1);
    }
}

fn run_describe() {
    let snapper = Snapper::new(HyprlandWm::new(), ActionRegistry::new());
    match snapper.describe_foreground() {
        Ok(Some(line)) => println!("{}", line),
        Ok(None) => info!("no foreground window"),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Normal daemon mode.
fn run_daemon(config_path: PathBuf) {
    let config = match Config::load(&config_path) {
        Ok(cfg) => {
            info!(
                "loaded {} action(s) from {}",
                cfg.actions.len(),
                config_path.display()
            );
            cfg
        }
        Err(e) => {
            error!("{}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };
    let registry = ActionRegistry::with_actions(config.actions);

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            error!("cannot locate own executable: {}", e);
            std::process::exit(1);
        }
    };

    // Claim the socket before any hotkey so a second daemon leaves the
    // first one's binds and socket alone.
    let listener = match UnixSocketListener::bind(default_socket_path()) {
        Ok(listener) => listener,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let socket = listener.path().to_path_buf();
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_source(listener, cmd_tx);

    let mut binder = HyprlandBinder::new(exe);
    if let Err(e) = bind_all(&mut binder, &registry) {
        error!("{}", e);
        remove_socket(&socket);
        std::process::exit(1);
    }

    let snapper = Snapper::new(HyprlandWm::new(), registry);
    start_event_loop(&snapper, cmd_rx);

    unbind_all(&mut binder, snapper.registry());
    remove_socket(&socket);
}

//  Event loop

fn start_event_loop(snapper: &Snapper<HyprlandWm>, cmd_rx: mpsc::Receiver<Command>) {
    info!("there running");
    for cmd in cmd_rx {
        match cmd {
            Command::Activate(id) => {
                if let Err(e) = snapper.activate(id) {
                    snapper::report(id, &e);
                }
            }
            Command::Quit => {
                info!("quit requested");
                return;
            }
        }
    }
    info!("command source closed, exiting");
}

//  Helpers

fn spawn_command_source(mut source: UnixSocketListener, tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}

/// Only called for a socket this process bound.
fn remove_socket(path: &std::path::Path) {
    if let Err(e) = std::fs::remove_file(path) {
        info!("remove {}: {}", path.display(), e);
    }
}
