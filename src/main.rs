use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

mod app;
mod args;
mod booking;
mod controller;
mod dialog;
mod grid;
mod paths;
mod seed;
mod select;
mod store;
mod timeline;

use app::App;
use args::Cli;
use controller::Controller;
use seed::SeedData;
use store::BookingStore;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e:?}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: main exited with: {:?} ", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let seed = SeedData::load(cli.seed.as_deref())?;
    let (rooms, bookings) = seed.into_parts(date);
    tracing::info!("Loaded {} rooms, {} seed bookings", rooms.len(), bookings.len());

    let controller = Controller::new(BookingStore::new(bookings), date);
    let mut app = App::new(rooms, controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
