pub mod day_view;
pub mod month_view;
pub mod theme;
pub mod week_view;

use chrono::NaiveDate;

use crate::app::AppState;
use crate::planner::tot::TotType;
use crate::planner::visit::HourSlot;

/// A visit as drawn inside an hour cell.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitChip {
    pub visit_id: String,
    pub name: String,
    pub account: String,
    pub is_grabbed: bool,
}

/// A TOT block as drawn on one of the days it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct TotBadge {
    pub tot_id: String,
    pub name: String,
    pub kind: TotType,
    pub starts_today: bool,
    pub ends_today: bool,
}

pub(crate) fn visit_chips(state: &AppState, date: NaiveDate, slot: HourSlot) -> Vec<VisitChip> {
    let grabbed = state.grab.as_ref().map(|g| g.visit_id.as_str());
    state
        .schedule
        .visits_at(date, slot.hour())
        .into_iter()
        .map(|(_, visit)| VisitChip {
            visit_id: visit.id.clone(),
            name: visit.name.clone(),
            account: visit.account.clone(),
            is_grabbed: grabbed == Some(visit.id.as_str()),
        })
        .collect()
}

pub(crate) fn tot_badges(state: &AppState, date: NaiveDate) -> Vec<TotBadge> {
    state
        .schedule
        .tots_on(date)
        .into_iter()
        .map(|tot| TotBadge {
            tot_id: tot.id.clone(),
            name: tot.display_name().to_string(),
            kind: tot.kind,
            starts_today: tot.start.date() == date,
            ends_today: tot.end.date() == date,
        })
        .collect()
}
