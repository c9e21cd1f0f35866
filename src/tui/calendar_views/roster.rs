use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rep_planner::{
    app::{AppState, Focus, Mode},
    planner::roster::FilterDimension,
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let contacts = app.filtered_roster();
    let focused = app.focus == Focus::Roster;

    let mut lines = Vec::new();

    let active_filters: Vec<String> = FilterDimension::ALL
        .iter()
        .filter_map(|dim| app.roster_filter.value(*dim).map(|v| format!("{}={}", dim.label(), v)))
        .collect();
    if !active_filters.is_empty() {
        lines.push(Line::from(Span::styled(
            active_filters.join(" "),
            Style::default().fg(app.theme.header),
        )));
    }
    if !app.search_query.is_empty() || app.mode == Mode::Search {
        lines.push(Line::from(vec![
            Span::styled("/", Style::default().fg(app.theme.accent)),
            Span::raw(app.search_query.clone()),
        ]));
    }
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }

    if contacts.is_empty() {
        lines.push(Line::from(Span::styled("No matching contacts", Style::default().fg(app.theme.muted))));
    }

    for (idx, contact) in contacts.iter().enumerate() {
        let is_selected = focused && idx == app.roster_index;
        let cursor = if is_selected { ">" } else { " " };
        let name_style = if is_selected {
            Style::default().bg(app.theme.cursor_bg).fg(app.theme.cursor_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let ratio_style = if contact.frequency.is_met() {
            Style::default().fg(app.theme.target_met)
        } else {
            Style::default().fg(app.theme.muted)
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(app.theme.cursor_bg)),
            Span::styled(format!("{} ", contact.name), name_style),
            Span::styled(contact.frequency.to_string(), ratio_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {} | {} | {} | last {}", contact.account, contact.class, contact.area, contact.last_visited.format("%b %d")),
            Style::default().fg(app.theme.muted),
        )));
    }

    let border_style = if focused {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default()
    };
    let title = format!(" Roster ({}/{}) ", contacts.len(), app.roster.len());
    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(border_style).title(title));
    f.render_widget(content, area);
}
