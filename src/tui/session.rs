use std::io;
use std::path::PathBuf;

use anyhow::Context;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use rep_planner::{
    app::{AppState, Mode},
    input::{command_mode, grab_mode, insert_mode, normal_mode, search_mode},
    storage::{
        config::Config,
        roster_file::load_roster_or_demo,
        source::{EmptySource, SampleSource},
    },
    ui::theme::Theme,
};

use crate::tui::presentation::ui;

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub sample: bool,
    pub roster: Option<PathBuf>,
}

/// Builds the initial state from the config file and command-line overrides.
pub fn build_app_state(config: &Config, options: &SessionOptions) -> anyhow::Result<AppState> {
    let roster_path = options.roster.as_deref().or(config.roster.path.as_deref());
    let roster = load_roster_or_demo(roster_path).context("failed to load roster")?;

    let app = AppState::new()
        .with_theme(Theme::get_by_name(&config.ui.theme))
        .with_first_day(config.first_weekday())
        .with_view(config.default_view())
        .with_12h_clock(config.uses_12h_clock())
        .with_roster(roster.clone());

    let app = if options.sample {
        app.with_source(SampleSource::new(roster))
    } else {
        app.with_source(EmptySource)
    };

    Ok(app)
}

pub fn run_tui(options: SessionOptions) -> anyhow::Result<()> {
    let config = Config::load_or_create().context("failed to load configuration")?;
    let mut app = build_app_state(&config, &options)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("Session ended with error: {}", err);
    }

    res.map_err(anyhow::Error::from)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.mode {
                Mode::Normal => {
                    if app.show_help {
                        handle_help_keys(key.code, app);
                    } else if key.code == KeyCode::Char('q') && app.remove_tot_confirmation.is_none() {
                        tracing::info!("Quit requested");
                        return Ok(());
                    } else {
                        normal_mode::handle_key(key.code, app);
                    }
                }
                Mode::Command => {
                    if command_mode::handle_key(key.code, app) {
                        tracing::info!("Quit requested");
                        return Ok(());
                    }
                }
                Mode::Insert => insert_mode::handle_key(key.code, app),
                Mode::Grab => grab_mode::handle_key(key.code, app),
                Mode::Search => search_mode::handle_key(key.code, app),
            }
        }
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}
