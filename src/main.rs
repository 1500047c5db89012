use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use scrim::app::App;
use scrim::cli::Cli;
use scrim::styles::{init_theme, ThemeType};
use scrim::{tui, UiConfig};

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before handling panic so the terminal
        // is usable afterwards
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    // Set up logging directory; the TUI owns stdout, so logs go to a file
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
        .join("scrim");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("scrim.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "scrim.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    eprintln!("Logs are being written to: {:?}", log_file);

    let cli = Cli::parse();
    let config = UiConfig::load_or_create(&cli.config_path())?;

    // CLI theme flags win over the file config
    let theme_name = if cli.no_colors {
        "no-color".to_string()
    } else {
        cli.theme.clone().unwrap_or_else(|| config.theme.clone())
    };
    init_theme(theme_name.parse().unwrap_or(ThemeType::Dark));

    let mut terminal = tui::init()?;
    let mut app = App::new(&config, Duration::from_millis(cli.tick_rate));
    let result = app.run(&mut terminal);

    tui::restore()?;
    drop(guard);

    result
}
