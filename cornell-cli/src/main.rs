//! Cornell CLI - Terminal-based Cornell notes editor

mod commands;
mod config;
mod io;
mod logging;
mod ui;

use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::prelude::*;

use cornell_core::{App, BulkMode, Format, InputTarget, Mode};

use crate::config::{Config, CONFIG_FILE_NAME};

/// Cornell Notes - cue/notes pairs with a summary, in JSON or Markdown
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Notes file to open (.json or .md)
    file: Option<PathBuf>,

    /// Config file (default: ~/.cornell/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Bulk import only accepts exact `---` separator lines
    #[arg(long, global = true)]
    strict: bool,

    /// Directory for exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a notes file between JSON and Markdown
    Convert { input: PathBuf, output: PathBuf },
    /// Append pairs parsed from a text file to a notes document
    Bulk {
        /// Text with cue, `---` line, notes; blank lines between pairs
        input: PathBuf,
        /// Document to append to (.json or .md), created if missing
        #[arg(long)]
        into: PathBuf,
    },
}

/// Settings after merging the config file with command line flags
struct Settings {
    bulk_mode: BulkMode,
    export_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cornell_dir = io::cornell_dir()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| cornell_dir.join(CONFIG_FILE_NAME));
    let config = Config::load(&config_path)?;

    let level = args
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or(logging::default_log_level());
    let _logger = logging::init_logging(level, &cornell_dir.join("logs"))?;

    let settings = Settings {
        bulk_mode: if args.strict {
            BulkMode::Strict
        } else {
            config.bulk_mode
        },
        export_dir: args
            .export_dir
            .or(config.export_dir)
            .unwrap_or_else(|| cornell_dir.clone()),
    };

    match args.command {
        Some(Command::Convert { input, output }) => {
            commands::convert(&input, &output)?;
            println!("Wrote {}", output.display());
            Ok(())
        }
        Some(Command::Bulk { input, into }) => {
            let count = commands::bulk(&input, &into, settings.bulk_mode)?;
            println!("Imported {} note pairs into {}", count, into.display());
            Ok(())
        }
        None => run_editor(args.file.as_deref(), settings),
    }
}

fn run_editor(file: Option<&Path>, settings: Settings) -> Result<()> {
    let mut app = App::new(settings.bulk_mode);

    // Load file if provided
    if let Some(path) = file {
        open_file(&mut app, path);
    }

    // Setup terminal
    logging::install_panic_hook(restore_terminal);
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, settings: &Settings) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.mode {
                Mode::Normal => {
                    // Clear notice on any key
                    app.clear_notice();
                    handle_normal_mode(app, key.code, settings);
                }
                Mode::Input => handle_input_mode(app, key.code, key.modifiers),
                Mode::ConfirmClear => {
                    if key.code == KeyCode::Char('y') {
                        app.confirm_clear();
                    } else {
                        app.cancel_clear();
                    }
                }
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }
        }
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode, settings: &Settings) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.next_pair(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_pair(),

        // Pair actions
        KeyCode::Char('a') => app.add_pair(),
        KeyCode::Char('d') => {
            app.remove_selected();
        }
        KeyCode::Char('K') => {
            app.move_selected_up();
        }
        KeyCode::Char('J') => {
            app.move_selected_down();
        }
        KeyCode::Char('s') => {
            app.toggle_selected_important();
        }

        // Editing
        KeyCode::Char('c') | KeyCode::Enter => app.begin_input(InputTarget::Cue),
        KeyCode::Char('n') => app.begin_input(InputTarget::Notes),
        KeyCode::Char('t') => app.begin_input(InputTarget::Topic),
        KeyCode::Char('S') => app.begin_input(InputTarget::Summary),
        KeyCode::Char('b') => app.begin_input(InputTarget::BulkText),
        KeyCode::Char('C') => app.request_clear(),

        // Files
        KeyCode::Char('o') => app.begin_input(InputTarget::FilePath),
        KeyCode::Char('e') => export(app, Format::Json, &settings.export_dir),
        KeyCode::Char('m') => export(app, Format::Markdown, &settings.export_dir),

        _ => {}
    }
}

fn handle_input_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => commit_input(app),
        KeyCode::Enter => {
            if app.input_target.is_multiline() {
                app.input_buffer.push('\n');
            } else {
                commit_input(app);
            }
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Tab => {
            app.input_buffer.push('\t');
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}

fn commit_input(app: &mut App) {
    app.clear_notice();
    if let Some(path) = app.commit_input() {
        open_file(app, Path::new(&path));
    }
}

/// Read a notes file and swap it in; the open document survives failures
fn open_file(app: &mut App, path: &Path) {
    match io::read_source(path) {
        Ok((content, format)) => {
            if app.import_text(&content, format).is_ok() {
                info!("event=open module=cli status=ok path={}", path.display());
            }
        }
        Err(e) => {
            warn!("event=open module=cli status=error path={} error={:#}", path.display(), e);
            app.set_error(&format!("Error: {:#}", e));
        }
    }
}

fn export(app: &mut App, format: Format, dir: &Path) {
    match io::export_document(&app.document, format, dir)
        .with_context(|| format!("{} export failed", format))
    {
        Ok(path) => {
            info!("event=export module=cli status=ok format={} path={}", format.extension(), path.display());
            app.set_status(&format!("Notes saved as {} to {}", format, path.display()));
        }
        Err(e) => {
            warn!("event=export module=cli status=error format={} error={:#}", format.extension(), e);
            app.set_error(&format!("{:#}", e));
        }
    }
}
