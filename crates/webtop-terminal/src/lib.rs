//! Command interpreter and terminal subsystem.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The interpreter splits input
//! lines, resolves the command name, and dispatches `execute()`. A
//! [`Session`] wraps the registry with its own tree and working directory.

mod commands;
mod history;
mod interpreter;
mod session;
mod system_commands;

/// Register all built-in commands (fs, shell, system, power) into a registry.
pub use commands::register_builtins;
/// Bounded line history with recall cursor.
pub use history::History;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text or a signal).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared mutable environment passed to every command.
pub use interpreter::Environment;
pub use interpreter::{AppKind, PowerAction};
pub use session::{Response, Session, Signal, render_error};
/// Register system and power commands into a registry.
pub use system_commands::register_system_commands;
