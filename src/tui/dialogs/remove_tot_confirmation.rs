use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use rep_planner::app::AppState;

use crate::tui::dialogs::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some((tot_id, _)) = &app.remove_tot_confirmation else {
        return;
    };

    let tot = app.schedule.tot(tot_id);
    let name = tot.map(|t| t.display_name()).unwrap_or("this entry");
    let span = tot
        .map(|t| format!("{} - {}", t.start.format("%b %d %H:%M"), t.end.format("%b %d %H:%M")))
        .unwrap_or_default();

    let dialog_area = centered(f.size(), 60, 10);
    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(vec![Span::styled("Remove Time on Territory?", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Remove "),
            Span::styled(name, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::from(span),
        Line::from("It is removed from every day it covers."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Green)),
            Span::raw(" = Yes, remove | "),
            Span::styled("N", Style::default().fg(Color::Red)),
            Span::raw(" = No, keep"),
        ]),
    ];

    let dialog_paragraph = Paragraph::new(dialog_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Confirm Removal ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Center);

    f.render_widget(dialog_paragraph, dialog_area);
}
