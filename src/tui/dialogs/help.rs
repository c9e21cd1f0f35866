use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use rep_planner::app::AppState;

use crate::tui::dialogs::centered;

const HELP_HEIGHT: u16 = 23;

pub fn render(f: &mut Frame, app: &AppState) {
    let help_area = centered(f.size(), 64, HELP_HEIGHT);
    f.render_widget(Clear, help_area);

    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().fg(app.theme.help_section))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("rep-planner Help", Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        section("Everywhere:"),
        Line::from("  Tab      - Switch focus between roster and plan"),
        Line::from("  m/w/d    - Month/Week/Day view"),
        Line::from("  [ / ]    - Previous/next month, week or day"),
        Line::from("  t        - Jump to today"),
        Line::from("  /        - Search roster by name or account"),
        Line::from(""),
        section("Plan:"),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Next/previous hour slot"),
        Line::from("  Enter    - Open selected day"),
        Line::from("  g        - Grab visit (hjkl to move, Enter drop, Esc cancel)"),
        Line::from("  T        - Add time on territory"),
        Line::from("  x        - Remove time on territory"),
        Line::from(""),
        section("Roster:"),
        Line::from("  j/k      - Select contact"),
        Line::from("  a/Enter  - Add contact to plan"),
        Line::from("  1/2/3/4  - Cycle class/account/area/frequency filter"),
        Line::from("  0        - Clear filters"),
        Line::from(""),
        section("Commands:"),
        Line::from("  :q                          - Quit"),
        Line::from("  :goto DATE                  - Jump to date"),
        Line::from("  :theme NAME                 - Change theme"),
        Line::from("  :filter DIM VALUE | clear   - Filter roster"),
        Line::from("  :plan ID DATE HH:MM         - Add contact to plan"),
        Line::from("  :tot TYPE DATE HH:MM [END] HH:MM [NAME]"),
        Line::from("  :untot TOT_ID DATE          - Remove time on territory"),
        Line::from("  :move VISIT_ID DATE HH      - Move a visit"),
        Line::from(""),
    ];

    let visible_lines = HELP_HEIGHT.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
