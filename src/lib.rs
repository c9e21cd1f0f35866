pub mod app;
pub mod input;
pub mod planner;
pub mod storage;
pub mod ui;

pub use app::{AppState, Focus, Mode};
pub use planner::{
    Contact, DateRange, HourSlot, PlannerError, PlannerResult, Schedule, TotEntry, TotType,
    ViewType, VisitEntry,
};

pub use input::{command_mode, normal_mode};
