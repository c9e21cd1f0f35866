use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rep_planner::app::{AppState, Mode};
use rep_planner::planner::ViewType;

use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(65),
        ])
        .split(main_chunks[1]);

    let title_text = format!("rep-planner - {} View - {:?} Mode",
        match app.view {
            ViewType::Month => "Month",
            ViewType::Week => "Week",
            ViewType::Day => "Day",
        },
        app.mode
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    calendar_views::roster::render(f, app, content_chunks[0]);

    match app.view {
        ViewType::Month => calendar_views::month::render(f, app, content_chunks[1]),
        ViewType::Week => calendar_views::week::render(f, app, content_chunks[1]),
        ViewType::Day => calendar_views::day::render(f, app, content_chunks[1]),
    }

    let (status_text, status_color, alignment) = status_line(app);
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(alignment)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.visit_form.is_some() {
        dialogs::add_to_plan::render(f, app);
    }

    if app.tot_form.is_some() {
        dialogs::tot_form::render(f, app);
    }

    if app.remove_tot_confirmation.is_some() {
        dialogs::remove_tot_confirmation::render(f, app);
    }
}

fn status_line(app: &AppState) -> (String, ratatui::style::Color, Alignment) {
    match app.mode {
        Mode::Command => (app.command_buffer.clone(), app.theme.accent, Alignment::Left),
        Mode::Search => (format!("/{}", app.search_query), app.theme.accent, Alignment::Left),
        Mode::Grab => (
            "GRAB: h/j/k/l to choose a slot, Enter to drop, Esc to cancel".to_string(),
            app.theme.grab_target,
            Alignment::Center,
        ),
        _ => {
            if let Some(error) = &app.last_error {
                (error.clone(), app.theme.error, Alignment::Center)
            } else if let Some(note) = app.notifications.latest() {
                (format!("{}: {}", note.title, note.description), app.theme.success, Alignment::Center)
            } else {
                (
                    format!("Visits: {} | Press 'q' to quit, '?' for help", app.schedule.visit_count()),
                    app.theme.status_bar,
                    Alignment::Center,
                )
            }
        }
    }
}
