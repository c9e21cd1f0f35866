use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::planner::error::{PlannerError, PlannerResult};
use crate::planner::range::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TotType {
    GroupMeeting,
    RoundTable,
    OfficeMeeting,
    Conference,
    SickLeave,
    AnnualLeave,
    MaternityLeave,
}

/// Presentation attributes for a TOT type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotAttributes {
    pub label: &'static str,
    pub slug: &'static str,
    pub icon: &'static str,
    pub color: (u8, u8, u8),
}

// Indexed by `TotType as usize`; keep in declaration order.
static TOT_ATTRIBUTES: [TotAttributes; 7] = [
    TotAttributes { label: "Group meeting", slug: "group-meeting", icon: "👥", color: (52, 152, 219) },
    TotAttributes { label: "Round-table", slug: "round-table", icon: "🗣", color: (155, 89, 182) },
    TotAttributes { label: "Office meeting", slug: "office-meeting", icon: "🏢", color: (127, 140, 141) },
    TotAttributes { label: "Conference", slug: "conference", icon: "🎤", color: (230, 126, 34) },
    TotAttributes { label: "Sick leave", slug: "sick-leave", icon: "🩺", color: (231, 76, 60) },
    TotAttributes { label: "Annual leave", slug: "annual-leave", icon: "🌴", color: (39, 174, 96) },
    TotAttributes { label: "Maternity leave", slug: "maternity-leave", icon: "👶", color: (241, 196, 15) },
];

impl TotType {
    pub const ALL: [TotType; 7] = [
        TotType::GroupMeeting,
        TotType::RoundTable,
        TotType::OfficeMeeting,
        TotType::Conference,
        TotType::SickLeave,
        TotType::AnnualLeave,
        TotType::MaternityLeave,
    ];

    pub fn attributes(self) -> &'static TotAttributes {
        &TOT_ATTRIBUTES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.attributes().label
    }

    pub fn is_leave(self) -> bool {
        matches!(self, TotType::SickLeave | TotType::AnnualLeave | TotType::MaternityLeave)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        TotType::ALL
            .into_iter()
            .find(|t| t.attributes().slug == wanted)
            .ok_or_else(|| format!("Unknown TOT type: {}", s))
    }
}

/// A time-on-territory block: a meeting, conference or leave that may span several days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TotType,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TotEntry {
    pub fn dates(&self) -> DateRange {
        DateRange::new(self.start.date(), self.end.date())
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.dates().contains(date)
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.kind.label()
        } else {
            &self.name
        }
    }
}

/// Raw TOT form input, validated into a [`TotEntry`] by [`TotDraft::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct TotDraft {
    pub name: String,
    pub kind: TotType,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub multi_day: bool,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

impl TotDraft {
    pub fn new(kind: TotType) -> Self {
        Self {
            name: String::new(),
            kind,
            start_date: None,
            start_time: None,
            multi_day: false,
            end_date: None,
            end_time: None,
        }
    }

    pub fn build(&self, id: String) -> PlannerResult<TotEntry> {
        let start_date = self.start_date.ok_or(PlannerError::MissingField("start date"))?;
        let start_time = self.start_time.ok_or(PlannerError::MissingField("start time"))?;
        let end_date = if self.multi_day {
            self.end_date.ok_or(PlannerError::MissingField("end date"))?
        } else {
            start_date
        };
        let end_time = self.end_time.ok_or(PlannerError::MissingField("end time"))?;

        let start = start_date.and_time(start_time);
        let end = end_date.and_time(end_time);
        if end < start {
            return Err(PlannerError::EndBeforeStart { start, end });
        }

        Ok(TotEntry {
            id,
            name: self.name.trim().to_string(),
            kind: self.kind,
            start,
            end,
        })
    }
}
