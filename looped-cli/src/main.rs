//! Looped CLI - Terminal client for AI-generated study reels

mod api;
mod config;
mod input;
mod io;
mod logging;
mod runtime;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use looped_core::upload::is_accepted_file;
use looped_core::{App, Event, Screen};

use crate::api::ApiClient;
use crate::config::Config;
use crate::runtime::Executor;

const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "looped", version, about = "Browse, generate and quiz yourself on study reels")]
struct Cli {
    /// Server base URL (overrides the config file and LOOPED_SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,

    /// Config file (default: ~/.looped/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Screen to open: feed, reels, upload, explore, profile, onboarding
    #[arg(long)]
    screen: Option<String>,

    /// Start uploading this file right away
    #[arg(short, long)]
    upload: Option<String>,

    /// Log filter, e.g. debug or looped=trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let start_screen = match cli.screen.as_deref() {
        Some(name) => match Screen::from_name(name) {
            Some(screen) => Some(screen),
            None => bail!("Unknown screen: {name}"),
        },
        None => None,
    };
    if let Some(path) = cli.upload.as_deref() {
        if !is_accepted_file(path) {
            bail!("Unsupported file type: {path}");
        }
    }

    let dir = io::looped_dir()?;
    let config_path = cli.config.clone().unwrap_or_else(|| dir.join("config.toml"));
    let config = Config::load(&config_path)?
        .with_env(|key| std::env::var(key).ok())
        .with_server_url(cli.server)
        .with_log_level(cli.log_level);

    logging::init(&config.log_level, &dir.join("looped.log"))?;

    let rt = tokio::runtime::Runtime::new()?;
    let api = ApiClient::new(&config)?;
    info!(
        "Starting looped against {} (answers: {})",
        api.base(),
        config.answer_policy.as_str()
    );
    let (tx, rx) = mpsc::unbounded_channel();
    let executor = Executor::new(
        rt.handle().clone(),
        api,
        tx,
        Duration::from_millis(config.progress_interval_ms),
    );

    // Create app
    let mut app = App::new(config.answer_policy);
    for command in app.start() {
        executor.execute(command);
    }
    if let Some(screen) = start_screen {
        app.screen = screen;
    }
    if let Some(path) = cli.upload {
        app.screen = Screen::Upload;
        app.input_buffer = path.clone();
        executor.execute(app.upload_file(&path));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app, &executor, rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    rt.shutdown_timeout(Duration::from_secs(1));

    if let Err(e) = res {
        error!("Exited with error: {e:#}");
        eprintln!("Error: {e}");
    }
    info!("Bye");

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    executor: &Executor,
    mut rx: UnboundedReceiver<Event>,
) -> Result<()> {
    while app.running {
        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let TermEvent::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Clear status on any key
            app.clear_status();

            for command in input::handle_key(app, key.code) {
                executor.execute(command);
            }
        }
    }
    Ok(())
}
