use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::Datelike;
use rep_planner::{
    app::AppState,
    ui::week_view::{self, SlotCell},
};

use crate::tui::calendar_views::fit;

const CELL_WIDTH: usize = 12;

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = week_view::calculate_layout(app);

    let week_range = format!(
        "{} - {}",
        layout.range.start.format("%b %d"),
        layout.range.end.format("%b %d, %Y")
    );

    let mut lines = vec![
        Line::from(vec![
            Span::styled(week_range, Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    let mut header_spans = vec![Span::raw("         ")];
    let mut tot_spans = vec![Span::raw("         ")];
    for day in &layout.days {
        let day_str = fit(&format!(" {} {}", day.date.format("%a"), day.date.day()), CELL_WIDTH);
        let style = if day.is_selected {
            Style::default().bg(app.theme.cursor_bg).fg(app.theme.cursor_fg)
        } else if day.is_today {
            Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.header)
        };
        header_spans.push(Span::styled(day_str, style));

        match day.tots.first() {
            Some(tot) => {
                let more = if day.tots.len() > 1 { "+" } else { "" };
                let text = format!(" {}{}{}", tot.kind.attributes().icon, tot.name, more);
                tot_spans.push(Span::styled(
                    fit(&text, CELL_WIDTH),
                    Style::default().fg(app.theme.tot_color(tot.kind)),
                ));
            }
            None => tot_spans.push(Span::raw(" ".repeat(CELL_WIDTH))),
        }
    }
    lines.push(Line::from(header_spans));
    lines.push(Line::from(tot_spans));
    lines.push(Line::from(""));

    if let Some(first_day) = layout.days.first() {
        for (row, first_cell) in first_day.slots.iter().enumerate() {
            let mut line_spans = vec![Span::styled(
                format!("{:>8} ", app.format_slot(first_cell.slot)),
                Style::default().fg(app.theme.muted),
            )];
            for day in &layout.days {
                line_spans.push(cell_span(app, &day.slots[row]));
            }
            lines.push(Line::from(line_spans));
        }
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Week "));
    f.render_widget(content, area);
}

fn cell_span<'a>(app: &AppState, cell: &SlotCell) -> Span<'a> {
    let text = match cell.visits.as_slice() {
        [] => " ·".to_string(),
        [only] => format!(" {}", only.name),
        [first, rest @ ..] => format!(" {} +{}", first.name, rest.len()),
    };

    let style = if cell.is_drop_target {
        Style::default().bg(app.theme.grab_target).fg(app.theme.cursor_fg)
    } else if cell.is_cursor {
        Style::default().bg(app.theme.cursor_bg).fg(app.theme.cursor_fg)
    } else if cell.visits.iter().any(|v| v.is_grabbed) {
        Style::default().fg(app.theme.grab_target).add_modifier(Modifier::CROSSED_OUT)
    } else if cell.visits.is_empty() {
        Style::default().fg(app.theme.muted)
    } else {
        Style::default().fg(app.theme.visit)
    };

    Span::styled(fit(&text, CELL_WIDTH), style)
}
