use chrono::{Local, NaiveDate, NaiveTime, Utc, Weekday};

use crate::planner::contact::{demo_roster, Contact};
use crate::planner::error::{PlannerError, PlannerResult};
use crate::planner::navigation::{PlanCursors, ViewType};
use crate::planner::notify::{announce, long_date, plan_confirmation, NotificationLog, Notifier};
use crate::planner::range::{shift_days, shift_months, week_start_of, first_of_month, DateRange};
use crate::planner::roster::{cycle_filter, filter_roster, FilterDimension, RosterFilter};
use crate::planner::schedule::{DayBucket, DropTarget, Schedule, VisitLocation};
use crate::planner::tot::{TotDraft, TotEntry, TotType};
use crate::planner::visit::{HourSlot, VisitEntry};
use crate::storage::source::{EmptySource, ScheduleSource};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Grab,
    Command,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Roster,
    Plan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitField {
    Date,
    Time,
}

/// Add-to-Plan dialog input, kept as text until submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitForm {
    pub contact_id: u32,
    pub contact_name: String,
    pub date_input: String,
    pub time_input: String,
    pub active_field: VisitField,
}

impl VisitForm {
    pub fn new(contact: &Contact, date: NaiveDate, slot: HourSlot) -> Self {
        Self {
            contact_id: contact.id,
            contact_name: contact.name.clone(),
            date_input: date.format("%Y-%m-%d").to_string(),
            time_input: slot.to_string(),
            active_field: VisitField::Date,
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            VisitField::Date => VisitField::Time,
            VisitField::Time => VisitField::Date,
        };
    }

    pub fn active_buffer(&mut self) -> &mut String {
        match self.active_field {
            VisitField::Date => &mut self.date_input,
            VisitField::Time => &mut self.time_input,
        }
    }

    pub fn date(&self) -> PlannerResult<Option<NaiveDate>> {
        parse_optional_date(&self.date_input)
    }

    pub fn slot(&self) -> PlannerResult<Option<HourSlot>> {
        if self.time_input.trim().is_empty() {
            return Ok(None);
        }
        HourSlot::parse(&self.time_input).map(Some)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotField {
    Name,
    Type,
    StartDate,
    StartTime,
    MultiDay,
    EndDate,
    EndTime,
}

/// TOT dialog input. The end date is only visited when the block spans several days.
#[derive(Debug, Clone, PartialEq)]
pub struct TotForm {
    pub name: String,
    pub kind: TotType,
    pub start_date_input: String,
    pub start_time_input: String,
    pub multi_day: bool,
    pub end_date_input: String,
    pub end_time_input: String,
    pub active_field: TotField,
}

impl TotForm {
    pub fn new(date: NaiveDate, slot: HourSlot) -> Self {
        let date_text = date.format("%Y-%m-%d").to_string();
        let end = slot.next().unwrap_or(slot);
        Self {
            name: String::new(),
            kind: TotType::GroupMeeting,
            start_date_input: date_text.clone(),
            start_time_input: slot.to_string(),
            multi_day: false,
            end_date_input: date_text,
            end_time_input: end.to_string(),
            active_field: TotField::Name,
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            TotField::Name => TotField::Type,
            TotField::Type => TotField::StartDate,
            TotField::StartDate => TotField::StartTime,
            TotField::StartTime => TotField::MultiDay,
            TotField::MultiDay if self.multi_day => TotField::EndDate,
            TotField::MultiDay => TotField::EndTime,
            TotField::EndDate => TotField::EndTime,
            TotField::EndTime => TotField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            TotField::Name => TotField::EndTime,
            TotField::Type => TotField::Name,
            TotField::StartDate => TotField::Type,
            TotField::StartTime => TotField::StartDate,
            TotField::MultiDay => TotField::StartTime,
            TotField::EndDate => TotField::MultiDay,
            TotField::EndTime if self.multi_day => TotField::EndDate,
            TotField::EndTime => TotField::MultiDay,
        };
    }

    /// The text buffer behind the active field, if it is a text field.
    pub fn active_buffer(&mut self) -> Option<&mut String> {
        match self.active_field {
            TotField::Name => Some(&mut self.name),
            TotField::StartDate => Some(&mut self.start_date_input),
            TotField::StartTime => Some(&mut self.start_time_input),
            TotField::EndDate => Some(&mut self.end_date_input),
            TotField::EndTime => Some(&mut self.end_time_input),
            TotField::Type | TotField::MultiDay => None,
        }
    }

    pub fn to_draft(&self) -> PlannerResult<TotDraft> {
        Ok(TotDraft {
            name: self.name.clone(),
            kind: self.kind,
            start_date: parse_optional_date(&self.start_date_input)?,
            start_time: parse_optional_time(&self.start_time_input)?,
            multi_day: self.multi_day,
            end_date: parse_optional_date(&self.end_date_input)?,
            end_time: parse_optional_time(&self.end_time_input)?,
        })
    }
}

pub fn parse_optional_date(input: &str) -> PlannerResult<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y/%m/%d"))
        .map(Some)
        .map_err(|_| PlannerError::InvalidDate(input.to_string()))
}

/// TOT times are free-form `HH:MM`, unlike visit hour slots.
fn parse_optional_time(input: &str) -> PlannerResult<Option<NaiveTime>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(input, "%H:%M")
        .map(Some)
        .map_err(|_| PlannerError::InvalidTime(input.to_string()))
}

/// A visit picked up in Grab mode. The drop target follows the plan cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct GrabState {
    pub source: VisitLocation,
    pub visit_id: String,
    pub origin_hour: HourSlot,
}

pub struct AppState {
    pub mode: Mode,
    pub view: ViewType,
    pub focus: Focus,
    pub today: NaiveDate,
    pub cursors: PlanCursors,
    pub selected_date: NaiveDate,
    pub selected_hour: HourSlot,
    pub roster: Vec<Contact>,
    pub roster_filter: RosterFilter,
    pub search_query: String,
    pub roster_index: usize,
    pub schedule: Schedule,
    pub source: Box<dyn ScheduleSource>,
    pub notifications: NotificationLog,
    pub last_error: Option<String>,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub use_12h_clock: bool,
    pub visit_form: Option<VisitForm>,
    pub tot_form: Option<TotForm>,
    pub grab: Option<GrabState>,
    pub remove_tot_confirmation: Option<(String, NaiveDate)>,
}

impl AppState {
    pub fn new() -> Self {
        Self::at(Local::now().date_naive())
    }

    /// A planner opened on `today`, with the demo roster and nothing planned.
    pub fn at(today: NaiveDate) -> Self {
        let mut state = Self {
            mode: Mode::Normal,
            view: ViewType::Week,
            focus: Focus::Plan,
            today,
            cursors: PlanCursors::at(today, Weekday::Sun),
            selected_date: today,
            selected_hour: HourSlot::first(),
            roster: demo_roster(),
            roster_filter: RosterFilter::default(),
            search_query: String::new(),
            roster_index: 0,
            schedule: Schedule::new(),
            source: Box::new(EmptySource),
            notifications: NotificationLog::new(),
            last_error: None,
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            use_12h_clock: false,
            visit_form: None,
            tot_form: None,
            grab: None,
            remove_tot_confirmation: None,
        };
        state.load_cursors();
        state
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_roster(mut self, roster: Vec<Contact>) -> Self {
        self.roster = roster;
        self.roster_index = 0;
        self
    }

    /// Replaces the backing source and reloads the visible ranges from it.
    pub fn with_source(mut self, source: impl ScheduleSource + 'static) -> Self {
        self.source = Box::new(source);
        self.schedule = Schedule::new();
        self.load_cursors();
        self
    }

    pub fn with_first_day(mut self, first_day_of_week: Weekday) -> Self {
        self.cursors = PlanCursors::at(self.selected_date, first_day_of_week);
        self.load_cursors();
        self
    }

    pub fn with_view(mut self, view: ViewType) -> Self {
        self.switch_view(view);
        self
    }

    pub fn with_12h_clock(mut self, enabled: bool) -> Self {
        self.use_12h_clock = enabled;
        self
    }

    fn load_cursors(&mut self) {
        for view in [ViewType::Week, ViewType::Month, ViewType::Day] {
            let range = self.cursors.range(view);
            self.schedule.load_range(range, self.source.as_ref());
        }
    }

    fn load(&mut self, range: DateRange) {
        self.schedule.load_range(range, self.source.as_ref());
    }

    /// The date range the active view is showing.
    pub fn visible_range(&self) -> DateRange {
        self.cursors.range(self.view)
    }

    pub fn visible_buckets(&self) -> Vec<&DayBucket> {
        self.schedule.buckets_in(self.visible_range())
    }

    /// Records a failed operation for the status bar and drops the error.
    pub fn report<T>(&mut self, result: PlannerResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(err) => {
                tracing::warn!("Rejected: {}", err);
                self.last_error = Some(err.to_string());
                None
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.last_error = Some(message);
    }

    // Navigation

    /// Changes which range is rendered. Nothing is reloaded.
    pub fn switch_view(&mut self, view: ViewType) {
        self.view = view;
        let range = self.visible_range();
        if !range.contains(self.selected_date) {
            self.selected_date = range.start;
        }
    }

    /// Steps the active view's cursor by `delta` weeks, months or days.
    pub fn shift_period(&mut self, delta: i32) {
        let range = self.cursors.shift(self.view, delta);
        self.load(range);
        let moved = match self.view {
            ViewType::Week => shift_days(self.selected_date, 7 * delta as i64),
            ViewType::Month => shift_months(self.selected_date, delta),
            ViewType::Day => self.cursors.day,
        };
        self.selected_date = if range.contains(moved) { moved } else { range.start };
    }

    pub fn jump_to_today(&mut self) {
        self.goto(self.today);
    }

    pub fn goto(&mut self, date: NaiveDate) {
        self.cursors.jump_to(date);
        self.load_cursors();
        self.selected_date = date;
    }

    /// Selects `date`, scrolling the active view when the date falls outside it.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        if self.visible_range().contains(date) {
            return;
        }
        match self.view {
            ViewType::Week => {
                self.cursors.week_start = week_start_of(date, self.cursors.first_day_of_week)
            }
            ViewType::Month => self.cursors.month = first_of_month(date),
            ViewType::Day => self.cursors.day = date,
        }
        let range = self.visible_range();
        self.load(range);
    }

    pub fn move_selection_days(&mut self, days: i64) {
        self.select_date(shift_days(self.selected_date, days));
    }

    pub fn next_hour(&mut self) {
        if let Some(next) = self.selected_hour.next() {
            self.selected_hour = next;
        }
    }

    pub fn prev_hour(&mut self) {
        if let Some(prev) = self.selected_hour.prev() {
            self.selected_hour = prev;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Roster => Focus::Plan,
            Focus::Plan => Focus::Roster,
        };
    }

    // Roster

    pub fn filtered_roster(&self) -> Vec<&Contact> {
        filter_roster(&self.roster, &self.roster_filter, &self.search_query)
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.filtered_roster().get(self.roster_index).copied()
    }

    pub fn move_roster_selection_down(&mut self) {
        let count = self.filtered_roster().len();
        if count > 0 && self.roster_index < count - 1 {
            self.roster_index += 1;
        }
    }

    pub fn move_roster_selection_up(&mut self) {
        self.roster_index = self.roster_index.saturating_sub(1);
    }

    fn clamp_roster_index(&mut self) {
        let count = self.filtered_roster().len();
        if self.roster_index >= count {
            self.roster_index = count.saturating_sub(1);
        }
    }

    pub fn set_filter(&mut self, dimension: FilterDimension, value: &str) {
        match self.roster_filter.set(dimension, value) {
            Ok(()) => self.last_error = None,
            Err(err) => self.set_error(err.to_string()),
        }
        self.clamp_roster_index();
    }

    pub fn cycle_filter(&mut self, dimension: FilterDimension) {
        cycle_filter(&mut self.roster_filter, &self.roster, dimension);
        self.clamp_roster_index();
    }

    pub fn clear_filters(&mut self) {
        self.roster_filter.clear();
        self.clamp_roster_index();
    }

    pub fn set_search(&mut self, query: String) {
        self.search_query = query;
        self.clamp_roster_index();
    }

    // Visits

    /// Books `contact_id` into the given cell and announces it.
    ///
    /// Both date and hour are required. The date is loaded first if no view holds it.
    pub fn add_to_plan(
        &mut self,
        contact_id: u32,
        date: Option<NaiveDate>,
        slot: Option<HourSlot>,
    ) -> PlannerResult<String> {
        let date = date.ok_or(PlannerError::MissingField("date"))?;
        let slot = slot.ok_or(PlannerError::MissingField("time"))?;
        let contact = self
            .roster
            .iter()
            .find(|c| c.id == contact_id)
            .cloned()
            .ok_or(PlannerError::ContactNotFound(contact_id))?;

        self.load(DateRange::single(date));
        let visit = VisitEntry::for_contact(&contact, date, slot, Utc::now());
        let id = self.schedule.add_visit(visit)?;

        announce(&mut self.notifications, &plan_confirmation(&contact, date, slot));
        Ok(id)
    }

    /// Moves the visit with `id` to the given cell.
    pub fn move_visit(&mut self, id: &str, date: NaiveDate, slot: HourSlot) -> PlannerResult<bool> {
        let from = self
            .schedule
            .locate_visit(id)
            .ok_or_else(|| PlannerError::UnknownVisit(id.to_string()))?;
        self.load(DateRange::single(date));
        self.schedule.move_visit(from, Some(DropTarget { date, slot }))
    }

    pub fn visits_in_selected_cell(&self) -> Vec<&VisitEntry> {
        self.schedule
            .visits_at(self.selected_date, self.selected_hour.hour())
            .into_iter()
            .map(|(_, v)| v)
            .collect()
    }

    /// Picks up the first visit in the cursor cell. Returns false when the cell is empty.
    pub fn begin_grab(&mut self) -> bool {
        let picked = self
            .schedule
            .visits_at(self.selected_date, self.selected_hour.hour())
            .first()
            .map(|(index, visit)| GrabState {
                source: VisitLocation {
                    date: self.selected_date,
                    index: *index,
                },
                visit_id: visit.id.clone(),
                origin_hour: self.selected_hour,
            });

        match picked {
            Some(grab) => {
                tracing::debug!("Grabbed visit {}", grab.visit_id);
                self.grab = Some(grab);
                self.mode = Mode::Grab;
                true
            }
            None => {
                self.set_error(format!(
                    "No visit on {} at {}",
                    self.selected_date, self.selected_hour
                ));
                false
            }
        }
    }

    pub fn grab_target(&self) -> Option<DropTarget> {
        self.grab.as_ref().map(|_| DropTarget {
            date: self.selected_date,
            slot: self.selected_hour,
        })
    }

    /// Drops the grabbed visit on the cursor cell.
    pub fn drop_grabbed(&mut self) -> PlannerResult<bool> {
        let Some(grab) = self.grab.take() else {
            return Ok(false);
        };
        self.mode = Mode::Normal;
        let target = DropTarget {
            date: self.selected_date,
            slot: self.selected_hour,
        };
        self.load(DateRange::single(target.date));
        self.schedule.move_visit(grab.source, Some(target))
    }

    /// Abandons the drag and returns the cursor to where the visit was picked up.
    pub fn cancel_grab(&mut self) {
        if let Some(grab) = self.grab.take() {
            self.select_date(grab.source.date);
            self.selected_hour = grab.origin_hour;
        }
        self.mode = Mode::Normal;
    }

    // TOT

    pub fn add_tot(&mut self, draft: &TotDraft) -> PlannerResult<String> {
        let entry = draft.build(uuid::Uuid::new_v4().to_string())?;
        let description = format!(
            "{} starts {} at {}.",
            entry.display_name(),
            long_date(entry.start.date()),
            entry.start.format("%H:%M")
        );
        let id = self.schedule.add_tot(entry);
        self.notifications.notify("Time on Territory Added", &description);
        Ok(id)
    }

    /// Removes a TOT from every day it spans. A no-op unless `date` shows it.
    pub fn remove_tot(&mut self, id: &str, date: NaiveDate) -> Option<TotEntry> {
        let removed = self.schedule.remove_tot(id, date)?;
        self.notifications.notify(
            "Time on Territory Removed",
            &format!("{} was removed from your plan.", removed.display_name()),
        );
        Some(removed)
    }

    pub fn request_tot_removal(&mut self) {
        let first = self
            .schedule
            .tots_on(self.selected_date)
            .first()
            .map(|t| t.id.clone());
        match first {
            Some(id) => self.remove_tot_confirmation = Some((id, self.selected_date)),
            None => self.set_error(format!("No time on territory on {}", self.selected_date)),
        }
    }

    pub fn confirm_tot_removal(&mut self) {
        if let Some((id, date)) = self.remove_tot_confirmation.take() {
            self.remove_tot(&id, date);
        }
    }

    pub fn cancel_tot_removal(&mut self) {
        self.remove_tot_confirmation = None;
    }

    // Forms

    pub fn open_visit_form(&mut self) -> bool {
        let Some(contact) = self.selected_contact() else {
            return false;
        };
        self.visit_form = Some(VisitForm::new(contact, self.selected_date, self.selected_hour));
        self.mode = Mode::Insert;
        true
    }

    /// Submits the Add-to-Plan form; on failure it stays open with the error shown.
    pub fn submit_visit_form(&mut self) {
        let Some(form) = self.visit_form.clone() else {
            return;
        };
        let result = form
            .date()
            .and_then(|date| form.slot().map(|slot| (date, slot)))
            .and_then(|(date, slot)| self.add_to_plan(form.contact_id, date, slot));
        if self.report(result).is_some() {
            self.close_forms();
        }
    }

    pub fn open_tot_form(&mut self) {
        self.tot_form = Some(TotForm::new(self.selected_date, self.selected_hour));
        self.mode = Mode::Insert;
    }

    pub fn submit_tot_form(&mut self) {
        let Some(form) = self.tot_form.clone() else {
            return;
        };
        let result = form.to_draft().and_then(|draft| self.add_tot(&draft));
        if self.report(result).is_some() {
            self.close_forms();
        }
    }

    pub fn close_forms(&mut self) {
        self.visit_form = None;
        self.tot_form = None;
        self.mode = Mode::Normal;
    }

    pub fn set_theme(&mut self, name: &str) -> bool {
        match Theme::find(name) {
            Some(theme) => {
                self.theme = theme;
                true
            }
            None => {
                self.set_error(format!("Unknown theme: {}", name));
                false
            }
        }
    }

    pub fn format_slot(&self, slot: HourSlot) -> String {
        if self.use_12h_clock {
            slot.label_12h()
        } else {
            slot.to_string()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
