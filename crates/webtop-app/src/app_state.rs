use webtop_calc::Calculator;
use webtop_desktop::{Document, FileNavigator, KeyValueStore, Settings};
use webtop_terminal::{AppKind, Session};
use webtop_types::config::WebtopConfig;
use webtop_types::error::Result;
use webtop_vfs::VfsPath;

/// Escape sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// The application that currently receives input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Terminal,
    Calculator,
    Editor,
    Files,
    Settings,
}

impl From<AppKind> for Mode {
    fn from(app: AppKind) -> Self {
        match app {
            AppKind::Terminal => Mode::Terminal,
            AppKind::Calculator => Mode::Calculator,
            AppKind::Editor => Mode::Editor,
            AppKind::Files => Mode::Files,
            AppKind::Settings => Mode::Settings,
        }
    }
}

/// Everything one desktop session owns.
pub struct AppState {
    pub session: Session,
    pub calc: Calculator,
    pub document: Document,
    pub navigator: FileNavigator,
    pub settings: Settings,
    pub store: Box<dyn KeyValueStore>,
    pub mode: Mode,
    /// Lines waiting to be printed.
    pub output_lines: Vec<String>,
}

impl AppState {
    pub fn new(config: WebtopConfig, store: Box<dyn KeyValueStore>) -> Result<Self> {
        Ok(Self::with_session(Session::new(config)?, store))
    }

    /// Restore the editor and settings from `store` around `session`.
    pub fn with_session(session: Session, store: Box<dyn KeyValueStore>) -> Self {
        let document = Document::restore(store.as_ref());
        let settings = Settings::load(store.as_ref());
        let navigator = FileNavigator::new(session.cwd().clone());
        let output_lines = session.banner().to_vec();
        Self {
            session,
            calc: Calculator::new(),
            document,
            navigator,
            settings,
            store,
            mode: Mode::Terminal,
            output_lines,
        }
    }

    pub fn prompt(&self) -> String {
        match self.mode {
            Mode::Terminal => self.session.prompt(),
            Mode::Calculator => format!("calc [{}]> ", self.calc.display()),
            Mode::Editor => format!("{}> ", self.document.title()),
            Mode::Files => format!("files:{}> ", self.navigator.current()),
            Mode::Settings => "settings> ".to_string(),
        }
    }

    /// Where the editor saves and lists documents.
    pub fn documents_dir(&self) -> VfsPath {
        self.session.home().join("Documents")
    }

    /// Switch the foreground application and print its greeting.
    pub fn open(&mut self, mode: Mode) {
        log::debug!("app: {:?} -> {mode:?}", self.mode);
        self.mode = mode;
        let intro: &[&str] = match mode {
            Mode::Terminal => &[],
            Mode::Calculator => &[
                "Calculator: type keys (e.g. 12+3=, CE, C, %).",
                "'history' lists results, 'exit' closes.",
            ],
            Mode::Editor => &[
                "Text Editor: lines are appended to the document.",
                ":w [name] save, :o name open, :ls list, :p print, :new, :q close",
            ],
            Mode::Files => &[
                "File Manager: ls, open NAME, back, forward, up, mkdir NAME, exit",
            ],
            Mode::Settings => &["Settings: show, set KEY VALUE, reset, exit"],
        };
        self.output_lines.extend(intro.iter().map(|s| s.to_string()));
        match mode {
            Mode::Editor => {
                let status = self.document.status_line();
                self.output_lines
                    .push(format!("[{}] {status}", self.document.title()));
            },
            Mode::Settings => self.output_lines.extend(self.settings.describe()),
            _ => {},
        }
    }

    /// Drain the pending output.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output_lines)
    }

    /// Write the editor text and settings to the store.
    pub fn persist(&mut self) -> Result<()> {
        self.document.autosave(self.store.as_mut())?;
        self.settings.save(self.store.as_mut())
    }
}
