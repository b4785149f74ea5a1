use aadhaar_portal::error::{PortalError, Result};
use aadhaar_portal::event::{Event, EventHandler};
use aadhaar_portal::narration::{Narrator, SilentNarrator};
use aadhaar_portal::portal::{PortalAction, PortalApp, PortalConfig};
use aadhaar_portal::router::Route;
use aadhaar_portal::status::{MockStatusTable, StatusLookup};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aadhaar-portal")]
#[command(author, version, about = "Terminal identity enrollment portal")]
struct Args {
    /// Path to config file (default: $XDG_CONFIG_HOME/aadhaar-portal/portal.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// View to open first, e.g. /status (overrides the config)
    #[arg(long)]
    route: Option<Route>,

    /// Disable spoken narration
    #[arg(long)]
    mute: bool,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if log file is specified
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting aadhaar-portal");
        }
    }

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;

    let result = run_portal(&mut terminal, &args).await;

    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Portal error: {}", e);
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| PortalError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| PortalError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| PortalError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| PortalError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .map_err(|e| PortalError::Terminal(e.to_string()))?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> PortalConfig {
    let loaded = match path {
        Some(path) => PortalConfig::load_from(path),
        None => PortalConfig::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {}", e);
        PortalConfig::default()
    })
}

async fn run_portal(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    args: &Args,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut events = EventHandler::new(tick_rate);

    let config = load_config(args.config.as_ref());

    // --route flag overrides config
    let start = match args.route {
        Some(route) => route,
        None => config.general.start_route.parse().unwrap_or_else(|e| {
            warn!("Bad start_route in config: {}", e);
            Route::default()
        }),
    };

    // --mute flag overrides config
    let narrator: Arc<dyn Narrator> = if args.mute {
        Arc::new(SilentNarrator)
    } else {
        config.narrator()
    };
    let lookup: Arc<dyn StatusLookup> =
        Arc::new(MockStatusTable::new(config.status.lookup_delay()));

    let mut app = PortalApp::new(config, start, narrator.clone(), lookup, events.sender());

    loop {
        terminal
            .draw(|frame| aadhaar_portal::portal::ui::draw(frame, &app))
            .map_err(|e| PortalError::Terminal(e.to_string()))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if let Some(PortalAction::Quit) = app.handle_key(key) {
                        app.should_exit = true;
                    }
                }
                Event::Timer { timer, .. } => app.on_timer(timer),
                Event::Lookup(response) => app.on_lookup(response),
                Event::Mouse => {}
                Event::Resize => {}
                Event::Tick => {
                    app.tick();
                }
            }
        }

        if app.should_exit {
            break;
        }
    }

    info!("Exiting aadhaar-portal");
    narrator.cancel();
    Ok(())
}
