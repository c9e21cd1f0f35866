use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use rep_planner::app::{AppState, VisitField};

use crate::tui::dialogs::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.visit_form else {
        return;
    };

    let form_area = centered(f.size(), 56, 12);
    f.render_widget(Clear, form_area);

    let label = |field: VisitField, text: &'static str| {
        let color = if form.active_field == field { app.theme.cursor_bg } else { Color::DarkGray };
        Span::styled(text, Style::default().fg(color))
    };

    let mut form_text = vec![
        Line::from(vec![
            Span::styled("Add ", Style::default().fg(app.theme.accent)),
            Span::styled(&form.contact_name, Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(" to Plan", Style::default().fg(app.theme.accent)),
        ]),
        Line::from(""),
        Line::from(vec![label(VisitField::Date, "Date: "), Span::raw(&form.date_input)]),
        Line::from(""),
        Line::from(vec![
            label(VisitField::Time, "Time: "),
            Span::raw(&form.time_input),
            Span::styled("  (09:00-17:00, on the hour)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    if let Some(error) = &app.last_error {
        form_text.push(Line::from(Span::styled(error.as_str(), Style::default().fg(app.theme.error))));
    }

    form_text.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Next field | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Add | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Cancel"),
    ]));

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Add to Plan ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
