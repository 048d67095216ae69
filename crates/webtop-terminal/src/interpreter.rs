//! Command trait, registry, and dispatch logic.
//!
//! A line is split on whitespace into a command name and arguments. Names
//! are case-insensitive. `help` and `history` are intercepted here because
//! they need access to the registry itself.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use webtop_platform::TimeService;
use webtop_types::config::WebtopConfig;
use webtop_types::error::{Result, WebtopError};
use webtop_vfs::{Vfs, VfsPath};

use crate::history::History;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text, possibly spanning several lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the terminal output buffer.
    Clear,
    /// Signal to the desktop to shut down, reboot, or log out.
    Power(PowerAction),
    /// Signal to the desktop to bring an application to the front.
    Launch(AppKind),
}

/// Session-ending actions a command can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Shutdown,
    Reboot,
    Logout,
}

impl PowerAction {
    /// Notice printed to the terminal when the action is requested.
    pub fn message(self) -> &'static str {
        match self {
            PowerAction::Shutdown => "System will shutdown in 5 seconds...",
            PowerAction::Reboot => "System will reboot in 5 seconds...",
            PowerAction::Logout => "Logging out...",
        }
    }
}

/// Applications hosted by the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    Terminal,
    Files,
    Editor,
    Calculator,
    Settings,
}

impl AppKind {
    pub const ALL: [AppKind; 5] = [
        AppKind::Terminal,
        AppKind::Files,
        AppKind::Editor,
        AppKind::Calculator,
        AppKind::Settings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AppKind::Terminal => "terminal",
            AppKind::Files => "files",
            AppKind::Editor => "editor",
            AppKind::Calculator => "calculator",
            AppKind::Settings => "settings",
        }
    }

    /// Window title shown by the desktop.
    pub fn title(self) -> &'static str {
        match self {
            AppKind::Terminal => "Terminal",
            AppKind::Files => "File Manager",
            AppKind::Editor => "Text Editor",
            AppKind::Calculator => "Calculator",
            AppKind::Settings => "Settings",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppKind {
    type Err = WebtopError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" | "term" => Ok(AppKind::Terminal),
            "files" | "file-manager" | "filemanager" => Ok(AppKind::Files),
            "editor" | "texteditor" | "text-editor" => Ok(AppKind::Editor),
            "calculator" | "calc" => Ok(AppKind::Calculator),
            "settings" => Ok(AppKind::Settings),
            _ => Err(WebtopError::Command(format!("unknown application: {s}"))),
        }
    }
}

/// Shared mutable environment passed to every command.
pub struct Environment<'a> {
    /// Current working directory. Only `cd` changes it.
    pub cwd: VfsPath,
    /// The virtual file system.
    pub vfs: &'a mut dyn Vfs,
    /// Time service for clock/uptime queries.
    pub time: Option<&'a dyn TimeService>,
    /// User, host, and home directory.
    pub config: &'a WebtopConfig,
    /// Everything after the command name, exactly as typed.
    pub raw_args: String,
}

impl Environment<'_> {
    /// The configured home directory as a path.
    pub fn home(&self) -> VfsPath {
        VfsPath::parse(&self.config.home)
    }

    /// Resolve a user-supplied path argument against the working directory.
    pub fn resolve(&self, input: &str) -> Result<VfsPath> {
        expand_path(&*self.vfs, &self.cwd, &self.home(), input)
    }
}

/// Resolve `input` against `cwd`, expanding a leading `~` to `home`.
///
/// `..` is walked against the tree, so it fails when the segment before it
/// is missing or is a file.
pub fn expand_path(
    vfs: &dyn Vfs,
    cwd: &VfsPath,
    home: &VfsPath,
    input: &str,
) -> Result<VfsPath> {
    if input == "~" {
        return Ok(home.clone());
    }
    if let Some(rest) = input.strip_prefix("~/") {
        return vfs.canonicalize(home, rest);
    }
    vfs.canonicalize(cwd, input)
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[-l\] \[path\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Commands handled by the registry itself.
const INTERCEPTED: [(&str, &str); 2] = [
    ("help", "List available commands"),
    ("history", "Show command history"),
];

/// Registry of available commands with dispatch.
///
/// Also holds the command history, which survives across lines.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    history: RefCell<History>,
}

impl CommandRegistry {
    /// Create an empty registry with the default history limit.
    pub fn new() -> Self {
        Self::with_history_limit(crate::history::DEFAULT_LIMIT)
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            commands: HashMap::new(),
            history: RefCell::new(History::new(limit)),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    // -- History API --

    /// Snapshot of the recorded lines, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().entries().to_vec()
    }

    /// Step the recall cursor back. `None` leaves the input line untouched.
    pub fn history_previous(&self) -> Option<String> {
        self.history.borrow_mut().previous().map(str::to_string)
    }

    /// Step the recall cursor forward; past the newest entry yields "".
    pub fn history_next(&self) -> Option<String> {
        self.history.borrow_mut().next().map(str::to_string)
    }

    /// Parse and execute a command line.
    ///
    /// The trimmed line is recorded in history before dispatch, so
    /// `history` lists itself. Unknown names fail with `UnknownCommand`.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(CommandOutput::None);
        }

        self.history.borrow_mut().push(trimmed);

        let (name, rest) = split_command(trimmed);
        let args: Vec<&str> = rest.split_whitespace().collect();
        let name_lower = name.to_ascii_lowercase();
        env.raw_args = rest.to_string();

        match name_lower.as_str() {
            "help" => return self.execute_help(&args),
            "history" => return self.execute_history_cmd(&args),
            _ => {},
        }

        match self.commands.get(name_lower.as_str()) {
            Some(cmd) => {
                log::debug!("terminal: dispatch {name_lower} {args:?}");
                cmd.execute(&args, env)
            },
            None => Err(WebtopError::UnknownCommand(name.to_string())),
        }
    }

    // -- Intercepted commands --

    /// Built-in help with access to the registry.
    fn execute_help(&self, args: &[&str]) -> Result<CommandOutput> {
        if let Some(&name) = args.first() {
            let name_lower = name.to_ascii_lowercase();
            if let Some((builtin, desc)) = INTERCEPTED.iter().find(|(n, _)| *n == name_lower) {
                return Ok(CommandOutput::Text(format!(
                    "{builtin} (shell)\n  {desc}\n  Usage: {builtin}"
                )));
            }
            return match self.commands.get(name_lower.as_str()) {
                Some(cmd) => Ok(CommandOutput::Text(format!(
                    "{} ({})\n  {}\n  Usage: {}",
                    cmd.name(),
                    cmd.category(),
                    cmd.description(),
                    cmd.usage()
                ))),
                None => Err(WebtopError::Command(format!(
                    "help: no help topics match '{name}'"
                ))),
            };
        }

        // Group commands by category.
        let mut categories: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
        for (name, desc) in &INTERCEPTED {
            categories.entry("shell").or_default().push((*name, *desc));
        }
        for cmd in self.commands.values() {
            categories
                .entry(cmd.category())
                .or_default()
                .push((cmd.name(), cmd.description()));
        }

        let mut out = String::from("Available commands:\n");
        for (cat, cmds) in &mut categories {
            cmds.sort_by_key(|(name, _)| *name);
            out.push_str(&format!("\n  [{cat}]\n"));
            for (name, desc) in cmds.iter() {
                out.push_str(&format!("    {name:12} {desc}\n"));
            }
        }
        out.push_str("\nType 'help <command>' for details.");
        Ok(CommandOutput::Text(out))
    }

    /// Built-in `history` command.
    fn execute_history_cmd(&self, args: &[&str]) -> Result<CommandOutput> {
        if args.first() == Some(&"-c") {
            self.history.borrow_mut().clear();
            return Ok(CommandOutput::None);
        }
        let hist = self.history.borrow();
        let mut out = String::new();
        for (i, entry) in hist.entries().iter().enumerate() {
            out.push_str(&format!("  {:4}  {entry}\n", i + 1));
        }
        Ok(CommandOutput::Text(out.trim_end().to_string()))
    }

    /// Sorted command names (including shell built-ins) starting with `partial`.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let lower = partial.to_ascii_lowercase();
        let mut names: Vec<String> = self
            .commands
            .keys()
            .map(String::as_str)
            .chain(INTERCEPTED.iter().map(|(n, _)| *n))
            .filter(|name| name.starts_with(&lower))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a trimmed line at the first whitespace into name and remainder.
///
/// The remainder keeps its inner spacing: `echo  a   b` yields `" a   b"`.
pub fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (line, ""),
    }
}
