use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use rep_planner::app::{AppState, TotField};

use crate::tui::dialogs::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.tot_form else {
        return;
    };

    let form_area = centered(f.size(), 64, 20);
    f.render_widget(Clear, form_area);

    let label = |field: TotField, text: &'static str| {
        let color = if form.active_field == field { app.theme.cursor_bg } else { Color::DarkGray };
        Span::styled(text, Style::default().fg(color))
    };

    let attributes = form.kind.attributes();
    let mut form_text = vec![
        Line::from(vec![Span::styled("Time on Territory", Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![label(TotField::Name, "Name: "), Span::raw(&form.name)]),
        Line::from(""),
        Line::from(vec![
            label(TotField::Type, "Type: "),
            Span::styled(
                format!("< {} {} >", attributes.icon, attributes.label),
                Style::default().fg(app.theme.tot_color(form.kind)),
            ),
        ]),
        Line::from(""),
        Line::from(vec![label(TotField::StartDate, "Start date: "), Span::raw(&form.start_date_input)]),
        Line::from(vec![label(TotField::StartTime, "Start time: "), Span::raw(&form.start_time_input)]),
        Line::from(""),
        Line::from(vec![
            label(TotField::MultiDay, "Multi-day: "),
            Span::raw(if form.multi_day { "[x]" } else { "[ ]" }),
        ]),
    ];

    if form.multi_day {
        form_text.push(Line::from(vec![label(TotField::EndDate, "End date: "), Span::raw(&form.end_date_input)]));
    }
    form_text.push(Line::from(vec![label(TotField::EndTime, "End time: "), Span::raw(&form.end_time_input)]));
    form_text.push(Line::from(""));

    if let Some(error) = &app.last_error {
        form_text.push(Line::from(Span::styled(error.as_str(), Style::default().fg(app.theme.error))));
    }

    form_text.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Next | "),
        Span::styled("←/→", Style::default().fg(Color::Cyan)),
        Span::raw(" = Type | "),
        Span::styled("Space", Style::default().fg(Color::Cyan)),
        Span::raw(" = Toggle | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Save | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Cancel"),
    ]));

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" New Time on Territory ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
