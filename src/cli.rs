//! Command-line interface for shortcut-relay.
//!
//! `check` validates a keymap and lists its bindings; `replay` feeds key
//! strings through a registry and prints the callbacks they trigger.

use crate::console::ConsoleHost;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shortcut_relay_config::{LogLevel, RelayConfig};
use shortcut_relay_keybindings::{
    DeferredQueue, KeyPress, ShortcutRegistry, parse_key_combination, raw_actions_from_keymap,
};
use std::path::PathBuf;
use std::rc::Rc;

/// shortcut-relay - keyboard shortcut registry and dispatcher
#[derive(Parser, Debug)]
#[command(name = "shortcut-relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Keymap file (default: ~/.config/shortcut-relay/keymap.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub keymap: Option<PathBuf>,

    /// Log level for the debug log file (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the keymap and list its bindings in priority order
    Check,
    /// Dispatch key strings (e.g. "Ctrl+S", "enter") and print the callbacks
    Replay {
        /// Name of the widget that holds focus while keys are pressed
        #[arg(long, value_name = "WIDGET")]
        focus: Option<String>,

        /// Raw event target to resolve the action target from
        #[arg(long, value_name = "TARGET")]
        target: Option<String>,

        /// Keys to press, in order
        #[arg(required = true, value_name = "KEY")]
        keys: Vec<String>,
    },
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    match value.to_lowercase().as_str() {
        "off" => Ok(LogLevel::Off),
        "error" => Ok(LogLevel::Error),
        "warn" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        other => Err(format!("unknown log level '{}'", other)),
    }
}

/// Load the keymap named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<RelayConfig> {
    match &cli.keymap {
        Some(path) => RelayConfig::load_from(path)
            .with_context(|| format!("failed to load keymap {}", path.display())),
        None => RelayConfig::load().context("failed to load default keymap"),
    }
}

/// Run the selected command and return its output lines.
pub fn run(cli: &Cli) -> Result<Vec<String>> {
    let config = load_config(cli)?;
    crate::debug::apply_config_level(config.log_level);

    match &cli.command {
        Commands::Check => Ok(check(&config)),
        Commands::Replay {
            focus,
            target,
            keys,
        } => replay(&config, keys, focus.clone(), target.clone()),
    }
}

/// List resolved bindings as `combination  action  (caption)`.
pub fn check(config: &RelayConfig) -> Vec<String> {
    let actions = raw_actions_from_keymap(&config.shortcuts);

    let host = Rc::new(ConsoleHost::default());
    let mut registry = ShortcutRegistry::new("keymap", host, Rc::new(DeferredQueue::new()));
    registry.replace_bindings(&actions);
    let skipped = config.shortcuts.len().saturating_sub(registry.len());

    let mut lines: Vec<String> = registry
        .bindings()
        .iter()
        .map(|binding| {
            let combination = binding.combination().to_string();
            if binding.caption().is_empty() {
                format!("{:<20} {}", combination, binding.action_id())
            } else {
                format!(
                    "{:<20} {}  ({})",
                    combination,
                    binding.action_id(),
                    binding.caption()
                )
            }
        })
        .collect();

    lines.push(format!(
        "{} bindings, {} invalid entries skipped",
        registry.len(),
        skipped
    ));
    lines
}

/// Press each key in turn, draining deferred work after every key.
pub fn replay(
    config: &RelayConfig,
    keys: &[String],
    focus: Option<String>,
    target: Option<String>,
) -> Result<Vec<String>> {
    let host = Rc::new(ConsoleHost::new(focus));
    let queue = Rc::new(DeferredQueue::new());
    let mut registry = ShortcutRegistry::new("replay", Rc::clone(&host), queue.clone());
    registry.replace_bindings(&raw_actions_from_keymap(&config.shortcuts));

    let mut lines = Vec::new();
    for key in keys {
        let combination =
            parse_key_combination(key).with_context(|| format!("invalid key '{}'", key))?;

        let mut event = KeyPress::from_combination(&combination);
        if let Some(target) = &target {
            event = event.with_target(target.clone());
        }

        if !registry.dispatch(&mut event, None) {
            lines.push(format!("{}: no shortcut", combination));
            continue;
        }
        queue.run_pending();
        lines.extend(
            host.take_lines()
                .into_iter()
                .map(|line| format!("{}: {}", combination, line)),
        );
    }
    Ok(lines)
}
