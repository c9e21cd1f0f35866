use chrono::{NaiveDate, NaiveTime};
use crossterm::event::KeyCode;

use crate::app::{parse_optional_date, AppState, Mode};
use crate::planner::roster::FilterDimension;
use crate::planner::tot::{TotDraft, TotType};
use crate::planner::visit::HourSlot;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Goto(NaiveDate),
    Theme(String),
    Filter(FilterDimension, String),
    FilterClear,
    Plan {
        contact_id: u32,
        date: NaiveDate,
        slot: HourSlot,
    },
    Tot(TotDraft),
    Untot {
        tot_id: String,
        date: NaiveDate,
    },
    Move {
        visit_id: String,
        date: NaiveDate,
        slot: HourSlot,
    },
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };
    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    let parsed = match parts[0] {
        "q" | "quit" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        "goto" => arg(&parts, 1, "goto requires a date argument")
            .and_then(parse_date)
            .map(Command::Goto),
        "theme" => arg(&parts, 1, "theme requires a theme name").map(|name| Command::Theme(name.to_string())),
        "filter" => parse_filter(&parts),
        "plan" => parse_plan(&parts),
        "tot" => parse_tot(&parts),
        "untot" => parse_untot(&parts),
        "move" => parse_move(&parts),
        other => Err(format!("Unknown command: {}", other)),
    };

    parsed.unwrap_or_else(Command::Error)
}

fn arg<'a>(parts: &[&'a str], index: usize, missing: &str) -> Result<&'a str, String> {
    parts.get(index).copied().ok_or_else(|| missing.to_string())
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    match parse_optional_date(text) {
        Ok(Some(date)) => Ok(date),
        _ => Err(format!("Invalid date format: {}", text)),
    }
}

fn parse_slot(text: &str) -> Result<HourSlot, String> {
    HourSlot::parse(text).map_err(|err| err.to_string())
}

fn parse_time(text: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| format!("Invalid time: {}", text))
}

fn parse_filter(parts: &[&str]) -> Result<Command, String> {
    let dimension = arg(parts, 1, "filter requires a dimension or 'clear'")?;
    if dimension == "clear" {
        return Ok(Command::FilterClear);
    }
    let dimension: FilterDimension = dimension.parse()?;
    Ok(Command::Filter(dimension, parts[2..].join(" ")))
}

fn parse_plan(parts: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: plan CONTACT_ID DATE HH:MM";
    let contact_id = arg(parts, 1, USAGE)?
        .parse::<u32>()
        .map_err(|_| format!("Invalid contact id: {}", parts[1]))?;
    let date = parse_date(arg(parts, 2, USAGE)?)?;
    let slot = parse_slot(arg(parts, 3, USAGE)?)?;
    Ok(Command::Plan { contact_id, date, slot })
}

/// `tot TYPE DATE HH:MM [END_DATE] HH:MM [NAME...]`; an end date makes it multi-day.
fn parse_tot(parts: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: tot TYPE DATE HH:MM [END_DATE] HH:MM [NAME]";
    let kind: TotType = arg(parts, 1, USAGE)?.parse()?;
    let start_date = parse_date(arg(parts, 2, USAGE)?)?;
    let start_time = parse_time(arg(parts, 3, USAGE)?)?;

    let fourth = arg(parts, 4, USAGE)?;
    let (end_date, end_time, name_from) = match parse_optional_date(fourth) {
        Ok(Some(end_date)) => (Some(end_date), parse_time(arg(parts, 5, USAGE)?)?, 6),
        _ => (None, parse_time(fourth)?, 5),
    };

    Ok(Command::Tot(TotDraft {
        name: parts.get(name_from..).map(|words| words.join(" ")).unwrap_or_default(),
        kind,
        start_date: Some(start_date),
        start_time: Some(start_time),
        multi_day: end_date.is_some(),
        end_date,
        end_time: Some(end_time),
    }))
}

fn parse_untot(parts: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: untot TOT_ID DATE";
    let tot_id = arg(parts, 1, USAGE)?.to_string();
    let date = parse_date(arg(parts, 2, USAGE)?)?;
    Ok(Command::Untot { tot_id, date })
}

fn parse_move(parts: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: move VISIT_ID DATE HH";
    let visit_id = arg(parts, 1, USAGE)?.to_string();
    let date = parse_date(arg(parts, 2, USAGE)?)?;
    let slot = parse_slot(arg(parts, 3, USAGE)?)?;
    Ok(Command::Move { visit_id, date, slot })
}

/// Runs a parsed command. Returns true when the application should quit.
pub fn execute_command(command: Command, state: &mut AppState) -> bool {
    match command {
        Command::Quit => return true,
        Command::Help => {
            state.show_help = true;
            state.help_scroll = 0;
        }
        Command::Goto(date) => state.goto(date),
        Command::Theme(name) => {
            state.set_theme(&name);
        }
        Command::Filter(dimension, value) => state.set_filter(dimension, &value),
        Command::FilterClear => state.clear_filters(),
        Command::Plan { contact_id, date, slot } => {
            let result = state.add_to_plan(contact_id, Some(date), Some(slot));
            state.report(result);
        }
        Command::Tot(draft) => {
            let result = state.add_tot(&draft);
            state.report(result);
        }
        Command::Untot { tot_id, date } => {
            if state.remove_tot(&tot_id, date).is_none() {
                tracing::debug!("No TOT {} on {}; nothing removed", tot_id, date);
            }
        }
        Command::Move { visit_id, date, slot } => {
            let result = state.move_visit(&visit_id, date, slot);
            state.report(result);
        }
        Command::Error(message) => state.set_error(message),
    }
    false
}

/// Edits the `:` buffer. Returns true when a quit command was entered.
pub fn handle_key(key: KeyCode, state: &mut AppState) -> bool {
    match key {
        KeyCode::Esc => {
            state.command_buffer.clear();
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let command = parse_command(&state.command_buffer);
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            return execute_command(command, state);
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
        }
        KeyCode::Char(c) => state.command_buffer.push(c),
        _ => {}
    }
    false
}
