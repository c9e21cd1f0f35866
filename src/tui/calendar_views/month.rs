use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::{Datelike, NaiveDate};
use rep_planner::{
    app::{AppState, Mode},
    ui::month_view,
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = month_view::calculate_layout(app);

    let month_name = NaiveDate::from_ymd_opt(layout.year, layout.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", layout.year, layout.month));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(month_name, Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if let Some(first_week) = layout.weeks.first() {
        let header: Vec<Span> = first_week
            .days
            .iter()
            .map(|cell| {
                Span::styled(
                    format!(" {:<7}", cell.date.format("%a")),
                    Style::default().fg(app.theme.header),
                )
            })
            .collect();
        lines.push(Line::from(header));
    }

    for week in &layout.weeks {
        let mut day_spans = Vec::new();

        for cell in &week.days {
            let visits = match cell.visit_count {
                0 => "  ".to_string(),
                n => format!("•{}", n),
            };
            let icons: String = cell
                .tot_kinds
                .iter()
                .take(1)
                .map(|kind| kind.attributes().icon)
                .collect();
            let day_text = format!(" {:>2} {:<2}{:<2}", cell.date.day(), visits, icons);

            let mut style = Style::default();
            if !cell.is_current_month {
                style = style.fg(app.theme.muted);
            } else if cell.is_selected {
                style = style.bg(app.theme.cursor_bg).fg(app.theme.cursor_fg).add_modifier(Modifier::BOLD);
            } else if cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            } else if cell.visit_count > 0 {
                style = style.fg(app.theme.visit);
            }

            day_spans.push(Span::styled(day_text, style));
        }

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));

    let selected_tots = app.schedule.tots_on(app.selected_date);
    for tot in selected_tots {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {}", tot.kind.attributes().icon, tot.display_name()),
                Style::default().fg(app.theme.tot_color(tot.kind)),
            ),
            Span::styled(
                format!("  {} - {}", tot.start.format("%b %d %H:%M"), tot.end.format("%b %d %H:%M")),
                Style::default().fg(app.theme.muted),
            ),
        ]));
    }

    if app.mode == Mode::Grab {
        lines.push(Line::from(vec![
            Span::styled("GRAB ", Style::default().fg(app.theme.grab_target).add_modifier(Modifier::BOLD)),
            Span::raw("Enter = Drop on selected day | Esc = Cancel"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled("[ ]", Style::default().fg(app.theme.accent)),
            Span::raw(" = Month | "),
            Span::styled("Enter", Style::default().fg(app.theme.success)),
            Span::raw(" = Day view | "),
            Span::styled("m/w/d", Style::default().fg(app.theme.accent)),
            Span::raw(" = Views"),
        ]));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Month "));
    f.render_widget(content, area);
}
