use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use duenotes_tui::config::load_config;
use duenotes_tui::logging::init_logging;
use duenotes_tui::{App, EventHandler};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

/// Notes with deadlines, in the terminal
#[derive(Parser, Debug)]
#[command(name = "duenotes", version, about)]
struct Args {
    /// Notes file (overrides `store_path` from the config)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file, created with defaults when missing
    #[arg(short, long, value_name = "PATH", default_value = "duenotes.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(file) = args.file {
        config.store_path = file;
    }

    let log_guard = init_logging(&config.resolved_log_dir())?;
    tracing::info!(
        log_file = %log_guard.path().display(),
        store = %config.store_path.display(),
        "starting"
    );

    // Load before taking over the terminal so a corrupt store is reported
    // on stderr and left untouched
    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(err) => {
            let text = format!("{:#}", err);
            tracing::error!(error = %text, "failed to start");
            return Err(err);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_handler = EventHandler::new(app.config.tick_rate_ms);

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        let text = format!("{:#}", err);
        tracing::error!(error = %text, "terminal loop failed");
    }
    tracing::info!(notes = app.notes().len(), "exiting");

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| duenotes_tui::ui::render(f, app))?;

        // Handle events
        match event_handler.next()? {
            duenotes_tui::Event::Key(key) => {
                duenotes_tui::event::handle_key_event(key, app);
            }
            duenotes_tui::Event::Tick => {
                app.tick();
            }
            duenotes_tui::Event::Resize => {}
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
