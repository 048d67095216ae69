//! webtop entry point.
//!
//! Runs the desktop as a line-oriented session on stdin/stdout. The
//! terminal starts in the foreground; `open <app>` switches to the
//! calculator, text editor, file manager or settings, and `exit` returns.

mod app_state;
mod input;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use app_state::AppState;
use input::InputResult;
use webtop_desktop::{FileStore, KeyValueStore, MemoryStore};
use webtop_types::config::WebtopConfig;

/// File name of the persisted store inside `data_dir`.
const STATE_FILE: &str = "state.json";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg, WEBTOP_CONFIG env var, or ./webtop.toml.
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WEBTOP_CONFIG").ok())
        .unwrap_or_else(|| "webtop.toml".to_string());
    let config = WebtopConfig::load_or_default(Path::new(&config_path))
        .with_context(|| format!("loading config {config_path}"))?;
    log::info!("Starting webtop as {}@{}", config.user, config.hostname);

    let store: Box<dyn KeyValueStore> = match &config.data_dir {
        Some(dir) => {
            let path = dir.join(STATE_FILE);
            log::info!("Persisting state to {}", path.display());
            Box::new(
                FileStore::open(&path)
                    .with_context(|| format!("opening store {}", path.display()))?,
            )
        },
        None => Box::new(MemoryStore::new()),
    };

    let mut state = AppState::new(config, store)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut line = String::new();

    loop {
        for out in state.take_output() {
            writeln!(stdout, "{out}")?;
        }
        write!(stdout, "{}", state.prompt())?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            break;
        }
        let result = input::handle_line(line.trim_end_matches(['\r', '\n']), &mut state);
        if result == InputResult::Quit {
            for out in state.take_output() {
                writeln!(stdout, "{out}")?;
            }
            break;
        }
    }

    state.persist().context("saving state")?;
    log::info!("webtop shut down cleanly");
    Ok(())
}
