mod cli;
use cli::{parse_cli_mode, run_agenda_mode, CliMode, USAGE};
mod tui;
use tui::{run_tui, SessionOptions};

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{USAGE}");
            return Ok(());
        }
    };

    match cli_mode {
        CliMode::Help => {
            println!("{USAGE}");
            Ok(())
        }
        CliMode::Agenda { view, date, json, sample, roster } => {
            run_agenda_mode(view, date, json, SessionOptions { sample, roster })
        }
        CliMode::Default { sample, roster } => run_tui(SessionOptions { sample, roster }),
    }
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("rep-planner"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "rep-planner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("rep-planner started");
}
