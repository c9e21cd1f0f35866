use chrono::{Datelike, NaiveDate};

use crate::app::AppState;
use crate::planner::navigation::ViewType;
use crate::planner::range::{shift_days, week_start_of};
use crate::planner::tot::TotType;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub is_current_month: bool,
    pub visit_count: usize,
    pub tot_kinds: Vec<TotType>,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_selected: false,
            is_today: false,
            is_current_month: true,
            visit_count: 0,
            tot_kinds: Vec::new(),
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_current_month(mut self, current_month: bool) -> Self {
        self.is_current_month = current_month;
        self
    }

    pub fn with_visits(mut self, count: usize) -> Self {
        self.visit_count = count;
        self
    }

    pub fn with_tots(mut self, kinds: Vec<TotType>) -> Self {
        self.tot_kinds = kinds;
        self
    }
}

/// Whole weeks covering the month cursor. Padding days from the neighbouring
/// months are flagged and only show what is already loaded for them.
pub fn calculate_layout(state: &AppState) -> MonthLayout {
    let range = state.cursors.range(ViewType::Month);
    let year = range.start.year();
    let month = range.start.month();

    let grid_start = week_start_of(range.start, state.cursors.first_day_of_week);
    let mut weeks = Vec::new();
    let mut current = grid_start;

    while current <= range.end {
        let days = (0..7)
            .map(|offset| {
                let date = shift_days(current, offset);
                let in_month = range.contains(date);
                DayCell::new(date)
                    .with_selected(in_month && date == state.selected_date)
                    .with_today(date == state.today)
                    .with_current_month(in_month)
                    .with_visits(state.schedule.visits_on(date).len())
                    .with_tots(state.schedule.tots_on(date).iter().map(|t| t.kind).collect())
            })
            .collect();
        weeks.push(Week { days });
        current = shift_days(current, 7);
    }

    MonthLayout { year, month, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::visit::HourSlot;
    use crate::app::TotForm;
    use chrono::Weekday;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn month_state(today: NaiveDate) -> AppState {
        AppState::at(today).with_view(ViewType::Month)
    }

    #[test]
    fn month_layout_has_correct_year_and_month() {
        let state = month_state(date(2025, 1, 15));

        let layout = calculate_layout(&state);

        assert_eq!(layout.year, 2025);
        assert_eq!(layout.month, 1);
    }

    #[test]
    fn each_week_has_seven_days() {
        let state = month_state(date(2025, 1, 15));

        let layout = calculate_layout(&state);

        assert_eq!(layout.weeks.len(), 5);
        for week in &layout.weeks {
            assert_eq!(week.days.len(), 7);
        }
    }

    #[test]
    fn grid_starts_on_configured_first_weekday() {
        let state = month_state(date(2025, 1, 15)).with_first_day(Weekday::Mon);

        let layout = calculate_layout(&state);

        assert_eq!(layout.weeks[0].days[0].date, date(2024, 12, 30));
    }

    #[test]
    fn previous_month_days_marked_as_not_current() {
        let state = month_state(date(2025, 1, 15));

        let layout = calculate_layout(&state);

        let padding: Vec<NaiveDate> = layout.weeks[0]
            .days
            .iter()
            .filter(|c| !c.is_current_month)
            .map(|c| c.date)
            .collect();
        assert_eq!(padding, vec![date(2024, 12, 29), date(2024, 12, 30), date(2024, 12, 31)]);
    }

    #[test]
    fn selected_date_is_marked_in_layout() {
        let state = month_state(date(2025, 1, 15));

        let layout = calculate_layout(&state);

        let selected: Vec<_> = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .filter(|c| c.is_selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2025, 1, 15));
    }

    #[test]
    fn cells_count_planned_visits() {
        let mut state = month_state(date(2025, 1, 15));
        let nine = HourSlot::first();
        state.add_to_plan(1, Some(date(2025, 1, 10)), Some(nine)).unwrap();
        state.add_to_plan(2, Some(date(2025, 1, 10)), nine.next()).unwrap();

        let layout = calculate_layout(&state);

        let cell = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .find(|c| c.date == date(2025, 1, 10))
            .unwrap();
        assert_eq!(cell.visit_count, 2);
    }

    #[test]
    fn cells_list_tot_kinds() {
        let mut state = month_state(date(2025, 1, 15));
        let mut form = TotForm::new(date(2025, 1, 20), HourSlot::first());
        form.kind = TotType::Conference;
        state.add_tot(&form.to_draft().unwrap()).unwrap();

        let layout = calculate_layout(&state);

        let kinds: Vec<TotType> = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .flat_map(|c| c.tot_kinds.iter().copied())
            .collect();
        assert_eq!(kinds, vec![TotType::Conference]);
    }
}
