//! Trip Planner - search vacation packages from the terminal
//!
//! A terminal UI application that collects trip criteria, asks the planning
//! service for matching flight and hotel packages, and shows the itinerary
//! of the chosen trip.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use tripplan::app::App;
use tripplan::audio::{AmbientAudio, AudioBackend, CommandBackend, SilentBackend};
use tripplan::cli::{Cli, StartupConfig};
use tripplan::logging;
use tripplan::runtime::Runtime;
use tripplan::service::{Dispatcher, PlannerClient};
use tripplan::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Picks the music backend; a broken player command falls back to silence
fn audio_backend(config: &StartupConfig) -> Box<dyn AudioBackend + Send> {
    match &config.player {
        Some(command_line) => {
            match CommandBackend::from_command_line(command_line, config.tracks.clone()) {
                Ok(backend) => Box::new(backend),
                Err(err) => {
                    warn!(error = %err, "music player unavailable, continuing without sound");
                    Box::new(SilentBackend)
                }
            }
        }
        None => Box::new(SilentBackend),
    }
}

/// Runs the terminal event loop until the user quits
async fn run(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = PlannerClient::with_timeout(config.base_url.clone(), config.timeout)?;
    let audio = AmbientAudio::new(audio_backend(&config), config.muted);
    let mut runtime = Runtime::new(Dispatcher::new(client), audio);

    let (mut app, startup_effects) = App::with_startup_config(&config);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    runtime.execute_all(startup_effects);

    // Main event loop
    loop {
        terminal.draw(|f| ui::render(f, &mut app))?;

        // Apply every response that arrived since the last frame
        while let Some(event) = runtime.try_recv() {
            let effects = app.dispatch(event);
            runtime.execute_all(effects);
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let effects = app.handle_key(key);
                    runtime.execute_all(effects);
                }
            }
        }

        app.on_tick();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(2);
        }
    };

    match logging::init(config.log_file.as_deref()) {
        Ok(path) => info!(
            log_file = %path.display(),
            service = %config.base_url,
            "trip planner starting"
        ),
        Err(err) => eprintln!("Warning: logging disabled: {}", err),
    }

    match run(config).await {
        Ok(()) => {
            info!("trip planner exiting");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
