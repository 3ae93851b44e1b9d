//! navspy: a terminal document reader whose sidebar follows your scroll position.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use navspy::app_state::{AppState, Focus, Mode};
use navspy::{config, document::Document, formats, input, nav::NavData, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// How long to wait for input when no rebuild is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "navspy")]
#[command(about = "Read sectioned documents with a sidebar that follows along", long_about = None)]
struct Args {
    /// Files or directories to read
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Config file to use instead of ./navspy.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the table of contents as JSON and exit
    #[arg(long)]
    outline: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let mut cfg = config::Config::load(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Warning: {e}; using default settings");
        config::Config::default()
    });

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let files = input::find_documents(args.paths, &cfg.file_extensions)?;
    if files.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let format = formats::markdown::MarkdownFormat;
    let document = Document::load(&files, &format);
    if document.sections.is_empty() {
        eprintln!("No sections found in documents");
        return Ok(());
    }

    if args.outline {
        let outline = NavData::from_sections(&document.sections);
        let json = serde_json::to_string_pretty(&outline).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    let state = AppState::new(files, document, &cfg, Instant::now());
    run_tui(state, &cfg)
}

fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
    // The terminal belongs to the TUI, so logs only go to a file when asked for.
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run_tui(mut app: AppState, cfg: &config::Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &config::Config,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        let timeout = app.scheduler.timeout(Instant::now()).unwrap_or(IDLE_POLL);
        if !event::poll(timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let now = Instant::now();

        if app.mode == Mode::Search {
            match key.code {
                KeyCode::Char(c) => app.push_search_char(c),
                KeyCode::Backspace => app.pop_search_char(),
                KeyCode::Enter => app.finish_search(),
                KeyCode::Esc => app.clear_search(),
                _ => {}
            }
            continue;
        }

        app.message = None;
        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Tab => {
                app.focus = match app.focus {
                    Focus::Content => Focus::Sidebar,
                    Focus::Sidebar => Focus::Content,
                };
            }
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Esc if !app.search.is_empty() => app.clear_search(),
            KeyCode::Char('r') => app.reload(now),
            KeyCode::Char('t') => {
                app.scroll_to_top();
            }
            _ => match app.focus {
                Focus::Content => match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        app.scroll_content(-1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        app.scroll_content(1);
                    }
                    KeyCode::PageUp => {
                        app.scroll_pages(-1);
                    }
                    KeyCode::PageDown | KeyCode::Char(' ') => {
                        app.scroll_pages(1);
                    }
                    KeyCode::Home => {
                        app.scroll_to_top();
                    }
                    KeyCode::End => {
                        app.scroll_to_bottom();
                    }
                    _ => {}
                },
                Focus::Sidebar => match key.code {
                    KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
                    KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
                    KeyCode::PageUp => app.move_cursor(-10),
                    KeyCode::PageDown => app.move_cursor(10),
                    KeyCode::Enter | KeyCode::Char('l') => app.activate_cursor(now),
                    KeyCode::Char(' ' | 'h') => app.toggle_group_at_cursor(),
                    _ => {}
                },
            },
        }
    }
}
