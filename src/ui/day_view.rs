use chrono::{NaiveDate, NaiveDateTime};

use crate::app::AppState;
use crate::planner::tot::TotType;
use crate::ui::week_view::{slot_cells, SlotCell};

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub is_today: bool,
    pub hours: Vec<SlotCell>,
    pub tots: Vec<TotLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotLine {
    pub tot_id: String,
    pub name: String,
    pub kind: TotType,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// The day cursor's date; independent of the week being shown elsewhere.
pub fn calculate_layout(state: &AppState) -> DayLayout {
    let date = state.cursors.day;

    let tots = state
        .schedule
        .tots_on(date)
        .into_iter()
        .map(|tot| TotLine {
            tot_id: tot.id.clone(),
            name: tot.display_name().to_string(),
            kind: tot.kind,
            start: tot.start,
            end: tot.end,
        })
        .collect();

    DayLayout {
        date,
        is_today: date == state.today,
        hours: slot_cells(state, date),
        tots,
    }
}
