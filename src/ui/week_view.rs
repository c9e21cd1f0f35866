use chrono::NaiveDate;

use crate::app::AppState;
use crate::planner::navigation::ViewType;
use crate::planner::range::DateRange;
use crate::planner::visit::HourSlot;
use crate::ui::{tot_badges, visit_chips, TotBadge, VisitChip};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub range: DateRange,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub tots: Vec<TotBadge>,
    pub slots: Vec<SlotCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotCell {
    pub slot: HourSlot,
    pub is_cursor: bool,
    pub is_drop_target: bool,
    pub visits: Vec<VisitChip>,
}

/// One column per day of the week cursor, one row per plannable hour.
pub fn calculate_layout(state: &AppState) -> WeekLayout {
    let range = state.cursors.range(ViewType::Week);

    let days = range
        .dates()
        .into_iter()
        .map(|date| DayColumn {
            date,
            is_selected: date == state.selected_date,
            is_today: date == state.today,
            tots: tot_badges(state, date),
            slots: slot_cells(state, date),
        })
        .collect();

    WeekLayout { range, days }
}

pub(crate) fn slot_cells(state: &AppState, date: NaiveDate) -> Vec<SlotCell> {
    HourSlot::all()
        .map(|slot| {
            let is_cursor = date == state.selected_date && slot == state.selected_hour;
            SlotCell {
                slot,
                is_cursor,
                is_drop_target: is_cursor && state.grab.is_some(),
                visits: visit_chips(state, date, slot),
            }
        })
        .collect()
}
