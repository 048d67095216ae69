//! Line handlers for each foreground application.

use webtop_calc::parse_keys;
use webtop_desktop::{Activation, Settings};
use webtop_terminal::{Signal, render_error};
use webtop_types::error::{Result, WebtopError};
use webtop_vfs::{EntryKind, Vfs};

use crate::app_state::{AppState, CLEAR_SCREEN, Mode};

/// Result of handling a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Route one line to the foreground application.
pub fn handle_line(line: &str, state: &mut AppState) -> InputResult {
    match state.mode {
        Mode::Terminal => return handle_terminal_input(line, state),
        _ if is_close(line) => {
            close_app(state);
            return InputResult::Continue;
        },
        Mode::Calculator => handle_calculator_input(line, state),
        Mode::Editor => {
            if let Err(e) = handle_editor_input(line, state) {
                state.output_lines.push(render_error(&e));
            }
        },
        Mode::Files => {
            if let Err(e) = handle_files_input(line, state) {
                state.output_lines.push(render_error(&e));
            }
        },
        Mode::Settings => {
            if let Err(e) = handle_settings_input(line, state) {
                state.output_lines.push(render_error(&e));
            }
        },
    }
    InputResult::Continue
}

fn is_close(line: &str) -> bool {
    matches!(line.trim(), "exit" | "close" | ":q")
}

fn close_app(state: &mut AppState) {
    if state.mode == Mode::Editor
        && let Err(e) = state.document.autosave(state.store.as_mut())
    {
        log::warn!("editor: autosave failed: {e}");
    }
    state.mode = Mode::Terminal;
}

/// Terminal mode: run the line through the session and act on its signal.
pub fn handle_terminal_input(line: &str, state: &mut AppState) -> InputResult {
    let response = state.session.execute(line);
    state.output_lines.extend(response.lines);
    match response.signal {
        None => {},
        Some(Signal::Clear) => {
            state.output_lines.push(CLEAR_SCREEN.to_string());
            state
                .output_lines
                .extend(state.session.banner().iter().cloned());
        },
        Some(Signal::Power(action)) => {
            log::info!("power: {action:?}");
            return InputResult::Quit;
        },
        Some(Signal::Launch(app)) => {
            if app == webtop_terminal::AppKind::Files {
                let cwd = state.session.cwd().clone();
                if let Err(e) = state.navigator.navigate_to(state.session.vfs(), cwd) {
                    log::warn!("files: cannot follow terminal cwd: {e}");
                }
            }
            state.open(app.into());
        },
    }
    InputResult::Continue
}

fn handle_calculator_input(line: &str, state: &mut AppState) {
    match line.trim() {
        "history" => {
            if state.calc.history().is_empty() {
                state.output_lines.push("No calculations yet".to_string());
            } else {
                state.output_lines.extend(state.calc.history().iter().cloned());
            }
        },
        "clear-history" => state.calc.clear_history(),
        keys => match parse_keys(keys) {
            Ok(keys) => {
                state.calc.press_all(keys);
                let display = state.calc.display().to_string();
                state.output_lines.push(match state.calc.pending() {
                    Some(pending) => format!("{pending} {display}"),
                    None => display,
                });
            },
            Err(e) => state.output_lines.push(render_error(&e)),
        },
    }
}

fn handle_editor_input(line: &str, state: &mut AppState) -> Result<()> {
    let Some(cmd) = line.strip_prefix(':') else {
        state.document.append_line(line);
        return state.document.autosave(state.store.as_mut());
    };
    let (name, arg) = match cmd.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (cmd, ""),
    };
    let docs = state.documents_dir();
    match name {
        "w" => {
            let path = if arg.is_empty() {
                state
                    .document
                    .save(state.store.as_mut(), state.session.vfs_mut(), &docs)?
            } else {
                state
                    .document
                    .save_as(arg, state.store.as_mut(), state.session.vfs_mut(), &docs)?
            };
            state.output_lines.push(format!("Saved {path}"));
        },
        "o" => {
            if arg.is_empty() {
                return Err(WebtopError::MissingOperand {
                    command: ":o".to_string(),
                    operand: "file name".to_string(),
                });
            }
            let path = state.session.vfs().canonicalize(&docs, arg)?;
            state.document.open(state.session.vfs(), &path)?;
            state.output_lines.push(state.document.status_line());
        },
        "ls" => {
            let names = webtop_desktop::Document::list_documents(state.session.vfs(), &docs)?;
            state.output_lines.extend(names);
        },
        "p" => {
            state
                .output_lines
                .extend(state.document.text().lines().map(str::to_string));
        },
        "new" => state.document.clear(),
        "status" => {
            let line = format!(
                "{} - {} - {}",
                state.document.title(),
                state.document.status(),
                state.document.status_line()
            );
            state.output_lines.push(line);
        },
        other => {
            return Err(WebtopError::Command(format!("editor: unknown command :{other}")));
        },
    }
    Ok(())
}

fn handle_files_input(line: &str, state: &mut AppState) -> Result<()> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };
    let vfs = state.session.vfs();
    let moved = match cmd {
        "" | "ls" | "refresh" => true,
        "pwd" => {
            state.output_lines.push(state.navigator.current().to_string());
            false
        },
        "back" => state.navigator.back(vfs)?,
        "forward" => state.navigator.forward(vfs)?,
        "up" => state.navigator.up(vfs)?,
        "cd" | "go" => {
            state.navigator.navigate_str(vfs, arg)?;
            true
        },
        "open" => {
            if arg.is_empty() {
                return Err(WebtopError::MissingOperand {
                    command: "open".to_string(),
                    operand: "entry name".to_string(),
                });
            }
            match state.navigator.open_entry(vfs, arg)? {
                Activation::Navigated => true,
                Activation::OpenFile(path) => {
                    state.document.open(vfs, &path)?;
                    state.open(Mode::Editor);
                    return Ok(());
                },
            }
        },
        "mkdir" => {
            let path = state.navigator.new_folder(state.session.vfs_mut(), arg)?;
            state.output_lines.push(format!("Created {path}"));
            true
        },
        other => {
            return Err(WebtopError::Command(format!("files: unknown command '{other}'")));
        },
    };
    if moved {
        list_directory(state)?;
    }
    Ok(())
}

fn list_directory(state: &mut AppState) -> Result<()> {
    let rows = state.navigator.entries(state.session.vfs())?;
    state.output_lines.push(state.navigator.current().to_string());
    state.output_lines.extend(rows.into_iter().map(|row| {
        let suffix = if row.kind == EntryKind::Directory && !row.is_parent {
            "/"
        } else {
            ""
        };
        format!("  {:<8} {}{suffix}", row.icon.label(), row.name)
    }));
    Ok(())
}

fn handle_settings_input(line: &str, state: &mut AppState) -> Result<()> {
    let mut words = line.split_whitespace();
    match words.next() {
        None | Some("show") => {},
        Some("set") => {
            let (Some(key), Some(value)) = (words.next(), words.next()) else {
                return Err(WebtopError::MissingOperand {
                    command: "set".to_string(),
                    operand: "key and value".to_string(),
                });
            };
            state.settings.set(key, value)?;
            state.settings.save(state.store.as_mut())?;
        },
        Some("reset") => {
            state.settings = Settings::default();
            state.settings.save(state.store.as_mut())?;
        },
        Some(other) => {
            return Err(WebtopError::Command(format!("settings: unknown command '{other}'")));
        },
    }
    state.output_lines.extend(state.settings.describe());
    Ok(())
}
