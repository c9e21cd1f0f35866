pub mod contact;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod range;
pub mod roster;
pub mod schedule;
pub mod tot;
pub mod visit;

pub use contact::{Contact, ContactClass, FrequencyAchieved};
pub use error::{ErrorKind, PlannerError, PlannerResult};
pub use navigation::{PlanCursors, ViewType};
pub use notify::{Notification, NotificationLog, Notifier};
pub use range::{month_range, week_range, DateRange};
pub use roster::{filter_roster, FilterDimension, RosterFilter};
pub use schedule::{build_schedule, DayBucket, DropTarget, Schedule, VisitLocation};
pub use tot::{TotDraft, TotEntry, TotType};
pub use visit::{HourSlot, VisitEntry};
