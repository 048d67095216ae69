//! Terminal session: owns the tree, the registry and the working directory,
//! and turns command results into printable responses.

use webtop_platform::{DesktopPlatform, TimeService};
use webtop_types::config::WebtopConfig;
use webtop_types::error::{Result, WebtopError};
use webtop_vfs::{EntryKind, MemoryVfs, Vfs, VfsPath};

use crate::interpreter::{
    AppKind, CommandOutput, CommandRegistry, Environment, PowerAction, expand_path,
};

/// Side effect the host must carry out after a line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Wipe the scrollback and reprint the banner.
    Clear,
    Power(PowerAction),
    Launch(AppKind),
}

/// Result of running one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Lines to print, in order.
    pub lines: Vec<String>,
    /// Working directory after the line ran.
    pub cwd: VfsPath,
    pub signal: Option<Signal>,
    /// Whether `lines` is an error message.
    pub is_error: bool,
}

/// One interactive shell over a seeded tree.
pub struct Session {
    vfs: MemoryVfs,
    registry: CommandRegistry,
    cwd: VfsPath,
    config: WebtopConfig,
    clock: Box<dyn TimeService>,
}

impl Session {
    /// A session over the demo tree, starting in the configured home.
    pub fn new(config: WebtopConfig) -> Result<Self> {
        let vfs = MemoryVfs::seeded()?;
        Ok(Self::with_parts(config, vfs, Box::new(DesktopPlatform::new())))
    }

    /// Assemble a session from explicit parts. Starts in the configured
    /// home if it is a directory in `vfs`, else at root.
    pub fn with_parts(config: WebtopConfig, vfs: MemoryVfs, clock: Box<dyn TimeService>) -> Self {
        let mut registry = CommandRegistry::with_history_limit(config.history_limit);
        crate::register_builtins(&mut registry);
        let home = VfsPath::parse(&config.home);
        let cwd = if vfs.is_dir(&home) {
            home
        } else {
            log::warn!("terminal: home {home} missing, starting at /");
            VfsPath::root()
        };
        Self {
            vfs,
            registry,
            cwd,
            config,
            clock,
        }
    }

    /// Run one line. Never fails: errors come back as text with
    /// `is_error` set, and leave the working directory unchanged.
    pub fn execute(&mut self, line: &str) -> Response {
        let mut env = Environment {
            cwd: self.cwd.clone(),
            vfs: &mut self.vfs,
            time: Some(&*self.clock),
            config: &self.config,
            raw_args: String::new(),
        };
        let result = self.registry.execute(line, &mut env);
        let new_cwd = env.cwd;

        let mut response = Response {
            lines: Vec::new(),
            cwd: self.cwd.clone(),
            signal: None,
            is_error: false,
        };
        match result {
            Ok(output) => {
                self.cwd = new_cwd;
                response.cwd = self.cwd.clone();
                match output {
                    CommandOutput::Text(text) => {
                        response.lines = text.lines().map(str::to_string).collect();
                    },
                    CommandOutput::None => {},
                    CommandOutput::Clear => response.signal = Some(Signal::Clear),
                    CommandOutput::Power(action) => {
                        response.lines.push(action.message().to_string());
                        response.signal = Some(Signal::Power(action));
                    },
                    CommandOutput::Launch(app) => {
                        response.lines.push(format!("Opening {}...", app.title()));
                        response.signal = Some(Signal::Launch(app));
                    },
                }
            },
            Err(e) => {
                log::debug!("terminal: {line:?} failed: {e}");
                response.lines.push(render_error(&e));
                response.is_error = true;
            },
        }
        response
    }

    /// Candidates for the last token of `partial`.
    ///
    /// The first token completes against command names; later tokens
    /// complete against entries of the directory they point into, with a
    /// trailing `/` on directories. Dotfiles are offered only when the
    /// typed prefix starts with `.`.
    pub fn complete(&self, partial: &str) -> Vec<String> {
        let Some((_, token)) = partial.trim_start().rsplit_once(char::is_whitespace) else {
            return self.registry.completions(partial.trim_start());
        };

        let (dir_part, prefix) = match token.rfind('/') {
            Some(idx) => token.split_at(idx + 1),
            None => ("", token),
        };
        let dir = if dir_part.is_empty() {
            Ok(self.cwd.clone())
        } else {
            expand_path(&self.vfs, &self.cwd, &self.home(), dir_part)
        };
        let Ok(entries) = dir.and_then(|dir| self.vfs.list_children(&dir)) else {
            return Vec::new();
        };
        entries
            .into_iter()
            .filter(|e| e.name.starts_with(prefix))
            .filter(|e| prefix.starts_with('.') || !e.name.starts_with('.'))
            .map(|e| {
                let slash = if e.kind == EntryKind::Directory { "/" } else { "" };
                format!("{dir_part}{}{slash}", e.name)
            })
            .collect()
    }

    /// `user@host:cwd$ `
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.config.user, self.config.hostname, self.cwd
        )
    }

    pub fn banner(&self) -> &[String] {
        &self.config.banner
    }

    pub fn cwd(&self) -> &VfsPath {
        &self.cwd
    }

    /// Point the session at another directory (used by the file manager).
    pub fn set_cwd(&mut self, path: VfsPath) -> Result<()> {
        match self.vfs.resolve(&path)? {
            node if node.is_dir() => {
                self.cwd = path;
                Ok(())
            },
            _ => Err(WebtopError::NotADirectory(path.to_string())),
        }
    }

    pub fn home(&self) -> VfsPath {
        VfsPath::parse(&self.config.home)
    }

    pub fn config(&self) -> &WebtopConfig {
        &self.config
    }

    pub fn vfs(&self) -> &MemoryVfs {
        &self.vfs
    }

    pub fn vfs_mut(&mut self) -> &mut MemoryVfs {
        &mut self.vfs
    }

    pub fn history(&self) -> Vec<String> {
        self.registry.history()
    }

    /// Older history entry for the input line (up arrow).
    pub fn history_previous(&self) -> Option<String> {
        self.registry.history_previous()
    }

    /// Newer history entry for the input line (down arrow).
    pub fn history_next(&self) -> Option<String> {
        self.registry.history_next()
    }
}

/// Text shown for a failed line.
pub fn render_error(err: &WebtopError) -> String {
    match err {
        WebtopError::Command(msg) => msg.clone(),
        WebtopError::UnknownCommand(name) => format!("bash: {name}: command not found"),
        other => other.to_string(),
    }
}
