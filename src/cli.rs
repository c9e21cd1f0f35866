use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use rep_planner::{
    app::AppState,
    planner::{TotEntry, VisitEntry, ViewType},
    storage::config::Config,
};

use crate::tui::{build_app_state, SessionOptions};

pub const USAGE: &str =
    "Usage: rep-planner [--sample] [--roster PATH] [--agenda [week|month|day] [YYYY/MM/DD] [--json]]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Default {
        sample: bool,
        roster: Option<PathBuf>,
    },
    Agenda {
        view: ViewType,
        date: NaiveDate,
        json: bool,
        sample: bool,
        roster: Option<PathBuf>,
    },
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

pub fn parse_args<I>(args: I, today: NaiveDate) -> Result<CliMode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut sample = false;
    let mut json = false;
    let mut roster = None;
    let mut agenda: Option<(ViewType, NaiveDate)> = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sample" => sample = true,
            "--json" => json = true,
            "--roster" => {
                let path = args.next().ok_or("--roster needs a file path")?;
                roster = Some(PathBuf::from(path));
            }
            "--agenda" => {
                let mut view = ViewType::Day;
                let mut date = today;
                while let Some(next) = args.next_if(|next| !next.starts_with("--")) {
                    match next.as_str() {
                        "week" => view = ViewType::Week,
                        "month" => view = ViewType::Month,
                        "day" => view = ViewType::Day,
                        other => {
                            date = NaiveDate::parse_from_str(other, "%Y/%m/%d")
                                .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", other))?;
                        }
                    }
                }
                agenda = Some((view, date));
            }
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    match agenda {
        Some((view, date)) => Ok(CliMode::Agenda { view, date, json, sample, roster }),
        None if json => Err("--json only applies to --agenda".to_string()),
        None => Ok(CliMode::Default { sample, roster }),
    }
}

#[derive(Debug, Serialize)]
struct AgendaDay<'a> {
    date: NaiveDate,
    visits: Vec<&'a VisitEntry>,
    tots: Vec<&'a TotEntry>,
}

pub fn run_agenda_mode(
    view: ViewType,
    date: NaiveDate,
    json: bool,
    options: SessionOptions,
) -> anyhow::Result<()> {
    let config = Config::load_or_create().context("failed to load configuration")?;
    let mut app = build_app_state(&config, &options)?;
    app.goto(date);
    app.switch_view(view);

    if json {
        let output = format_agenda_json(&app).context("failed to serialize agenda")?;
        println!("{output}");
        Ok(())
    } else {
        display_with_pager(&format_agenda_text(&app)).context("failed to display agenda")
    }
}

fn agenda_days(app: &AppState) -> Vec<AgendaDay<'_>> {
    app.visible_buckets()
        .into_iter()
        .map(|bucket| {
            let mut visits: Vec<&VisitEntry> = bucket.visits.iter().collect();
            visits.sort_by_key(|visit| visit.time);
            AgendaDay {
                date: bucket.date,
                visits,
                tots: app.schedule.tots_on(bucket.date),
            }
        })
        .collect()
}

fn format_agenda_json(app: &AppState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&agenda_days(app))
}

fn format_agenda_text(app: &AppState) -> String {
    let range = app.visible_range();
    let mut lines = Vec::new();
    lines.push(match app.view {
        ViewType::Day => format!("Agenda - {}", range.start.format("%A, %B %d, %Y")),
        ViewType::Week => format!("Agenda - Week of {}", range.start.format("%B %d, %Y")),
        ViewType::Month => format!("Agenda - {}", range.start.format("%B %Y")),
    });

    let days = agenda_days(app);
    if days.iter().all(|day| day.visits.is_empty() && day.tots.is_empty()) {
        lines.push(String::new());
        lines.push("Nothing planned.".to_string());
        return lines.join("\n");
    }

    for day in days {
        if day.visits.is_empty() && day.tots.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(day.date.format("%a %b %d").to_string());
        for tot in &day.tots {
            lines.push(format!("  {}", build_tot_line(tot)));
        }
        for visit in &day.visits {
            lines.push(format!("  {:<13} {} @ {}", visit.time.format("%H:%M"), visit.name, visit.account));
        }
    }

    lines.join("\n")
}

fn build_tot_line(tot: &TotEntry) -> String {
    let attributes = tot.kind.attributes();
    let time_label = if tot.start.date() == tot.end.date() {
        format!("{}-{}", tot.start.format("%H:%M"), tot.end.format("%H:%M"))
    } else {
        format!("until {}", tot.end.format("%b %d"))
    };
    format!("{:<13} {} {}", time_label, attributes.icon, tot.display_name())
}

/// Splits a `$PAGER` value into program and arguments. Unset means `less`; blank means none.
fn pager_command(pager: Option<String>) -> Option<(String, Vec<String>)> {
    let pager = pager.unwrap_or_else(|| "less".to_string());
    let mut words = pager.split_whitespace().map(str::to_string);
    let program = words.next()?;
    Some((program, words.collect()))
}

/// Pipes the agenda through the pager, or prints it when no pager can be started.
fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let Some((program, args)) = pager_command(env::var("PAGER").ok()) else {
        println!("{text}");
        return Ok(());
    };

    let mut child = match Command::new(&program).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(err) => {
            tracing::warn!("Pager '{}' unavailable ({}); printing agenda", program, err);
            println!("{text}");
            return Ok(());
        }
    };
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    child.wait()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rep_planner::app::TotForm;
    use rep_planner::planner::HourSlot;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_start_the_tui() {
        let mode = parse_args(args(&[]), date(2025, 1, 15)).unwrap();

        assert_eq!(mode, CliMode::Default { sample: false, roster: None });
    }

    #[test]
    fn agenda_defaults_to_today_as_a_day() {
        let mode = parse_args(args(&["--agenda"]), date(2025, 1, 15)).unwrap();

        assert_eq!(
            mode,
            CliMode::Agenda {
                view: ViewType::Day,
                date: date(2025, 1, 15),
                json: false,
                sample: false,
                roster: None,
            }
        );
    }

    #[test]
    fn agenda_accepts_scope_date_and_flags() {
        let mode = parse_args(
            args(&["--agenda", "week", "2025/02/03", "--json", "--sample", "--roster", "team.json"]),
            date(2025, 1, 15),
        )
        .unwrap();

        assert_eq!(
            mode,
            CliMode::Agenda {
                view: ViewType::Week,
                date: date(2025, 2, 3),
                json: true,
                sample: true,
                roster: Some(PathBuf::from("team.json")),
            }
        );
    }

    #[test]
    fn bad_agenda_date_is_rejected() {
        let err = parse_args(args(&["--agenda", "2025-02-03"]), date(2025, 1, 15)).unwrap_err();

        assert!(err.contains("YYYY/MM/DD"));
    }

    #[test]
    fn roster_flag_needs_a_path() {
        assert!(parse_args(args(&["--roster"]), date(2025, 1, 15)).is_err());
    }

    #[test]
    fn json_without_agenda_is_rejected() {
        assert!(parse_args(args(&["--json"]), date(2025, 1, 15)).is_err());
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = parse_args(args(&["--sync"]), date(2025, 1, 15)).unwrap_err();

        assert_eq!(err, "Unknown argument: --sync");
    }

    #[test]
    fn pager_defaults_to_less_and_keeps_its_arguments() {
        assert_eq!(pager_command(None), Some(("less".to_string(), Vec::new())));
        assert_eq!(
            pager_command(Some("less -R -F".to_string())),
            Some(("less".to_string(), vec!["-R".to_string(), "-F".to_string()]))
        );
    }

    #[test]
    fn blank_pager_prints_directly() {
        assert_eq!(pager_command(Some("  ".to_string())), None);
    }

    #[test]
    fn empty_day_agenda_says_nothing_planned() {
        let mut app = AppState::at(date(2025, 1, 15));
        app.switch_view(ViewType::Day);

        let text = format_agenda_text(&app);

        assert_eq!(text, "Agenda - Wednesday, January 15, 2025\n\nNothing planned.");
    }

    #[test]
    fn week_agenda_lists_tots_then_visits_by_time() {
        let mut app = AppState::at(date(2025, 1, 15));
        let ten = HourSlot::new(10).unwrap();
        app.add_to_plan(2, Some(date(2025, 1, 15)), Some(ten)).unwrap();
        app.add_to_plan(1, Some(date(2025, 1, 15)), Some(HourSlot::first())).unwrap();
        let mut form = TotForm::new(date(2025, 1, 16), HourSlot::first());
        form.name = "Team Sync".to_string();
        app.add_tot(&form.to_draft().unwrap()).unwrap();

        let text = format_agenda_text(&app);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Agenda - Week of January 12, 2025");
        assert_eq!(lines[2], "Wed Jan 15");
        assert!(lines[3].contains("09:00") && lines[3].contains("John Doe"));
        assert!(lines[4].contains("10:00") && lines[4].contains("Jane Smith"));
        assert_eq!(lines[6], "Thu Jan 16");
        assert!(lines[7].contains("09:00-10:00") && lines[7].contains("Team Sync"));
    }

    #[test]
    fn json_agenda_has_one_entry_per_day() {
        let mut app = AppState::at(date(2025, 1, 15));
        app.add_to_plan(1, Some(date(2025, 1, 15)), Some(HourSlot::first())).unwrap();

        let json = format_agenda_json(&app).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let days = value.as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[3]["date"], "2025-01-15");
        assert_eq!(days[3]["visits"][0]["name"], "John Doe");
    }
}
