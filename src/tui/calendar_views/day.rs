use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rep_planner::{
    app::AppState,
    ui::day_view,
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = day_view::calculate_layout(app);

    let mut title_style = Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD);
    if layout.is_today {
        title_style = title_style.fg(app.theme.today);
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(layout.date.format("%A, %B %d, %Y").to_string(), title_style),
        ]),
        Line::from(""),
    ];

    for tot in &layout.tots {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {}", tot.kind.attributes().icon, tot.name),
                Style::default().fg(app.theme.tot_color(tot.kind)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} - {}", tot.start.format("%b %d %H:%M"), tot.end.format("%b %d %H:%M")),
                Style::default().fg(app.theme.muted),
            ),
        ]));
    }
    if !layout.tots.is_empty() {
        lines.push(Line::from(""));
    }

    for cell in &layout.hours {
        let label_style = if cell.is_drop_target {
            Style::default().bg(app.theme.grab_target).fg(app.theme.cursor_fg)
        } else if cell.is_cursor {
            Style::default().bg(app.theme.cursor_bg).fg(app.theme.cursor_fg)
        } else {
            Style::default().fg(app.theme.header)
        };

        let mut spans = vec![Span::styled(format!("{:>8}", app.format_slot(cell.slot)), label_style)];
        if cell.visits.is_empty() {
            spans.push(Span::styled("  -", Style::default().fg(app.theme.muted)));
        }
        for visit in &cell.visits {
            let style = if visit.is_grabbed {
                Style::default().fg(app.theme.grab_target).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(app.theme.visit)
            };
            spans.push(Span::styled(format!("  {}", visit.name), style));
            spans.push(Span::styled(format!(" ({})", visit.account), Style::default().fg(app.theme.muted)));
        }
        lines.push(Line::from(spans));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Day "));
    f.render_widget(content, area);
}
