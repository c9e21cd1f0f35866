use chrono::{NaiveDate, Weekday};

use crate::planner::range::{
    first_of_month, month_range, shift_days, shift_months, week_range, week_start_of, DateRange,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    Week,
    Month,
    Day,
}

/// The three independent positions the planner can be scrolled to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCursors {
    pub week_start: NaiveDate,
    pub day: NaiveDate,
    pub month: NaiveDate,
    pub first_day_of_week: Weekday,
}

impl PlanCursors {
    pub fn at(today: NaiveDate, first_day_of_week: Weekday) -> Self {
        Self {
            week_start: week_start_of(today, first_day_of_week),
            day: today,
            month: first_of_month(today),
            first_day_of_week,
        }
    }

    pub fn range(&self, scope: ViewType) -> DateRange {
        match scope {
            ViewType::Week => week_range(self.week_start),
            ViewType::Month => month_range(self.month),
            ViewType::Day => DateRange::single(self.day),
        }
    }

    /// Steps one cursor by `delta` units of its scope and returns that scope's new range.
    pub fn shift(&mut self, scope: ViewType, delta: i32) -> DateRange {
        match scope {
            ViewType::Week => self.week_start = shift_days(self.week_start, 7 * delta as i64),
            ViewType::Month => self.month = first_of_month(shift_months(self.month, delta)),
            ViewType::Day => self.day = shift_days(self.day, delta as i64),
        }
        self.range(scope)
    }

    /// Points every cursor at the period containing `date`.
    pub fn jump_to(&mut self, date: NaiveDate) {
        *self = Self::at(date, self.first_day_of_week);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn cursors_start_at_the_period_containing_today() {
        let cursors = PlanCursors::at(date(2024, 6, 12), Weekday::Sun);

        assert_eq!(cursors.week_start, date(2024, 6, 9));
        assert_eq!(cursors.day, date(2024, 6, 12));
        assert_eq!(cursors.month, date(2024, 6, 1));
    }

    #[test]
    fn shifting_week_moves_seven_days() {
        let mut cursors = PlanCursors::at(date(2024, 6, 12), Weekday::Sun);

        let range = cursors.shift(ViewType::Week, 1);

        assert_eq!(range, week_range(date(2024, 6, 16)));
        assert_eq!(cursors.shift(ViewType::Week, -2).start, date(2024, 6, 2));
    }

    #[test]
    fn shifting_month_crosses_year_boundary() {
        let mut cursors = PlanCursors::at(date(2024, 12, 20), Weekday::Sun);

        let range = cursors.shift(ViewType::Month, 1);

        assert_eq!(range.start, date(2025, 1, 1));
        assert_eq!(range.end, date(2025, 1, 31));
    }

    #[test]
    fn shifting_day_leaves_week_and_month_alone() {
        let mut cursors = PlanCursors::at(date(2024, 6, 15), Weekday::Sun);

        cursors.shift(ViewType::Day, 1);

        assert_eq!(cursors.day, date(2024, 6, 16));
        assert_eq!(cursors.week_start, date(2024, 6, 9));
        assert_eq!(cursors.month, date(2024, 6, 1));
    }

    #[test]
    fn jump_realigns_all_cursors() {
        let mut cursors = PlanCursors::at(date(2024, 6, 15), Weekday::Mon);

        cursors.jump_to(date(2025, 2, 5));

        assert_eq!(cursors.week_start, date(2025, 2, 3));
        assert_eq!(cursors.month, date(2025, 2, 1));
    }
}
