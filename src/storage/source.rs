use chrono::{Datelike, NaiveDate, Weekday};

use crate::planner::contact::Contact;
use crate::planner::range::DateRange;
use crate::planner::tot::TotEntry;
use crate::planner::visit::{visit_id, HourSlot, VisitEntry, FIRST_SLOT_HOUR, LAST_SLOT_HOUR};

/// Where persisted schedule entries come from when a date range is first loaded.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleSource {
    fn fetch_visits(&self, range: DateRange) -> Vec<VisitEntry>;

    fn fetch_tots(&self, _range: DateRange) -> Vec<TotEntry> {
        Vec::new()
    }
}

/// A source with nothing planned; every range loads empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl ScheduleSource for EmptySource {
    fn fetch_visits(&self, _range: DateRange) -> Vec<VisitEntry> {
        Vec::new()
    }
}

/// Demo data derived from the date alone, so the same range always yields the same visits.
#[derive(Debug, Clone)]
pub struct SampleSource {
    roster: Vec<Contact>,
}

impl SampleSource {
    pub fn new(roster: Vec<Contact>) -> Self {
        Self { roster }
    }

    fn visits_on(&self, date: NaiveDate) -> Vec<VisitEntry> {
        if self.roster.is_empty() || matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Vec::new();
        }

        let seed = (date.num_days_from_ce() as u64).wrapping_mul(2_654_435_761) >> 7;
        let count = (seed % 4) as usize;
        let slots = (LAST_SLOT_HOUR - FIRST_SLOT_HOUR + 1) as u64;

        (0..count)
            .filter_map(|i| {
                let contact = &self.roster[(seed as usize + i * 2) % self.roster.len()];
                let hour = FIRST_SLOT_HOUR + ((seed / 7 + i as u64 * 3) % slots) as u32;
                let slot = HourSlot::new(hour).ok()?;
                let time = date.and_time(slot.time());
                Some(VisitEntry {
                    id: visit_id(contact.id, time.and_utc()),
                    contact_id: contact.id,
                    name: contact.name.clone(),
                    account: contact.account.clone(),
                    time,
                })
            })
            .collect()
    }
}

impl ScheduleSource for SampleSource {
    fn fetch_visits(&self, range: DateRange) -> Vec<VisitEntry> {
        range.dates().into_iter().flat_map(|date| self.visits_on(date)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::contact::demo_roster;
    use crate::planner::range::{month_range, week_range};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn empty_source_loads_nothing() {
        assert!(EmptySource.fetch_visits(week_range(date(2024, 6, 9))).is_empty());
        assert!(EmptySource.fetch_tots(week_range(date(2024, 6, 9))).is_empty());
    }

    #[test]
    fn sample_source_is_deterministic() {
        let source = SampleSource::new(demo_roster());
        let range = month_range(date(2024, 6, 1));

        assert_eq!(source.fetch_visits(range), source.fetch_visits(range));
    }

    #[test]
    fn sample_visits_fall_inside_range_and_working_hours() {
        let source = SampleSource::new(demo_roster());
        let range = month_range(date(2024, 6, 1));

        let visits = source.fetch_visits(range);

        assert!(!visits.is_empty());
        for visit in &visits {
            assert!(range.contains(visit.date()));
            assert!(HourSlot::new(visit.hour()).is_ok());
        }
    }

    #[test]
    fn sample_source_skips_weekends() {
        let source = SampleSource::new(demo_roster());
        let saturday = date(2024, 6, 15);

        assert!(source.fetch_visits(DateRange::single(saturday)).is_empty());
    }

    #[test]
    fn sample_visit_ids_are_unique() {
        let source = SampleSource::new(demo_roster());
        let mut ids: Vec<String> = source
            .fetch_visits(month_range(date(2024, 6, 1)))
            .into_iter()
            .map(|v| v.id)
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), total);
    }
}
