use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::planner::contact::Contact;
use crate::planner::error::{PlannerError, PlannerResult};

pub const FIRST_SLOT_HOUR: u32 = 9;
pub const LAST_SLOT_HOUR: u32 = 17;

/// One of the on-the-hour slots a visit can be booked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct HourSlot(u32);

impl HourSlot {
    pub fn new(hour: u32) -> PlannerResult<Self> {
        if (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).contains(&hour) {
            Ok(Self(hour))
        } else {
            Err(PlannerError::InvalidHour(hour))
        }
    }

    pub fn first() -> Self {
        Self(FIRST_SLOT_HOUR)
    }

    pub fn all() -> impl Iterator<Item = HourSlot> {
        (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).map(HourSlot)
    }

    pub fn hour(&self) -> u32 {
        self.0
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.0, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn next(&self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }

    pub fn prev(&self) -> Option<Self> {
        self.0.checked_sub(1).and_then(|h| Self::new(h).ok())
    }

    /// Accepts `HH:MM` with zero minutes, or a bare hour.
    pub fn parse(input: &str) -> PlannerResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PlannerError::MissingField("time"));
        }
        let time = NaiveTime::parse_from_str(input, "%H:%M")
            .ok()
            .or_else(|| input.parse::<u32>().ok().and_then(|h| NaiveTime::from_hms_opt(h, 0, 0)));
        match time {
            Some(t) if t.minute() == 0 => Self::new(t.hour()),
            Some(_) => Err(PlannerError::NotOnTheHour(input.to_string())),
            None => Err(PlannerError::InvalidTime(input.to_string())),
        }
    }

    pub fn label_12h(&self) -> String {
        let suffix = if self.0 < 12 { "AM" } else { "PM" };
        let hour = match self.0 % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:00 {}", hour, suffix)
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl TryFrom<u32> for HourSlot {
    type Error = PlannerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HourSlot> for u32 {
    fn from(value: HourSlot) -> Self {
        value.0
    }
}

/// A planned contact visit at a single point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitEntry {
    pub id: String,
    pub contact_id: u32,
    pub name: String,
    pub account: String,
    pub time: NaiveDateTime,
}

impl VisitEntry {
    pub fn for_contact(contact: &Contact, date: NaiveDate, slot: HourSlot, created_at: DateTime<Utc>) -> Self {
        Self {
            id: visit_id(contact.id, created_at),
            contact_id: contact.id,
            name: contact.name.clone(),
            account: contact.account.clone(),
            time: date.and_time(slot.time()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}

pub fn visit_id(contact_id: u32, created_at: DateTime<Utc>) -> String {
    format!("{}-{}", contact_id, created_at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::contact::demo_roster;
    use chrono::TimeZone;

    #[test]
    fn slots_run_from_nine_to_five() {
        let hours: Vec<u32> = HourSlot::all().map(|s| s.hour()).collect();
        assert_eq!(hours, (9..=17).collect::<Vec<_>>());
    }

    #[test]
    fn hour_outside_working_day_is_rejected() {
        assert_eq!(HourSlot::new(8), Err(PlannerError::InvalidHour(8)));
        assert_eq!(HourSlot::new(18), Err(PlannerError::InvalidHour(18)));
    }

    #[test]
    fn parse_accepts_clock_and_bare_hour() {
        assert_eq!(HourSlot::parse("09:00").unwrap().hour(), 9);
        assert_eq!(HourSlot::parse("14").unwrap().hour(), 14);
    }

    #[test]
    fn parse_rejects_half_hours_and_empty_input() {
        assert_eq!(HourSlot::parse("10:30"), Err(PlannerError::NotOnTheHour("10:30".to_string())));
        assert_eq!(HourSlot::parse(""), Err(PlannerError::MissingField("time")));
    }

    #[test]
    fn parse_reports_unreadable_times_as_invalid() {
        assert_eq!(HourSlot::parse("9:75"), Err(PlannerError::InvalidTime("9:75".to_string())));
        assert_eq!(HourSlot::parse("abc"), Err(PlannerError::InvalidTime("abc".to_string())));
    }

    #[test]
    fn twelve_hour_label_matches_picker() {
        assert_eq!(HourSlot::new(9).unwrap().label_12h(), "9:00 AM");
        assert_eq!(HourSlot::new(12).unwrap().label_12h(), "12:00 PM");
        assert_eq!(HourSlot::new(17).unwrap().label_12h(), "5:00 PM");
    }

    #[test]
    fn visit_id_combines_contact_and_creation_time() {
        let created = Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap();
        assert_eq!(visit_id(3, created), format!("3-{}", created.timestamp_millis()));
    }

    #[test]
    fn visit_for_contact_composes_date_and_slot() {
        let contact = &demo_roster()[0];
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let visit = VisitEntry::for_contact(contact, date, HourSlot::new(11).unwrap(), created);

        assert_eq!(visit.date(), date);
        assert_eq!(visit.hour(), 11);
        assert_eq!(visit.account, "Acme Inc");
    }
}
