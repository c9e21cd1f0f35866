use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::planner::error::{PlannerError, PlannerResult};
use crate::planner::range::DateRange;
use crate::planner::tot::TotEntry;
use crate::planner::visit::{HourSlot, VisitEntry};
use crate::storage::source::ScheduleSource;

/// Everything planned for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub visits: Vec<VisitEntry>,
    pub tot_ids: Vec<String>,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            visits: Vec::new(),
            tot_ids: Vec::new(),
        }
    }
}

/// Position of a visit inside its day bucket; the drag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitLocation {
    pub date: NaiveDate,
    pub index: usize,
}

/// The (date, hour) cell a visit is dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub date: NaiveDate,
    pub slot: HourSlot,
}

/// Builds one bucket per date of `range`, in range order, from already fetched entries.
///
/// Visits outside `range` are ignored. TOT ids are attached to every bucket
/// their interval covers, earliest start first.
pub fn build_schedule(range: DateRange, visits: &[VisitEntry], tots: &[TotEntry]) -> Vec<DayBucket> {
    let mut tots: Vec<&TotEntry> = tots.iter().collect();
    tots.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    range
        .dates()
        .into_iter()
        .map(|date| DayBucket {
            date,
            visits: visits.iter().filter(|v| v.date() == date).cloned().collect(),
            tot_ids: tots.iter().filter(|t| t.covers(date)).map(|t| t.id.clone()).collect(),
        })
        .collect()
}

/// Date-indexed store backing the week, month and day views alike.
///
/// TOT entries live once in a table; buckets only hold their ids.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    buckets: BTreeMap<NaiveDate, DayBucket>,
    tots: HashMap<String, TotEntry>,
    removed_tots: HashSet<String>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every date of `range` not already held; held dates keep their contents.
    ///
    /// Returns how many dates were newly loaded.
    pub fn load_range(&mut self, range: DateRange, source: &dyn ScheduleSource) -> usize {
        let mut loaded = 0;
        for run in self.missing_runs(range) {
            let visits = source.fetch_visits(run);
            let tots: Vec<TotEntry> = source
                .fetch_tots(run)
                .into_iter()
                .filter(|tot| !self.removed_tots.contains(&tot.id))
                .collect();
            let fresh = build_schedule(run, &visits, &tots);
            for tot in tots {
                self.tots.entry(tot.id.clone()).or_insert(tot);
            }
            // Previously added TOTs may also cover the new dates.
            for mut bucket in fresh {
                bucket.tot_ids = self.covering_tot_ids(bucket.date);
                self.buckets.insert(bucket.date, bucket);
                loaded += 1;
            }
        }
        if loaded > 0 {
            tracing::debug!("Loaded {} day(s) for {}..{}", loaded, range.start, range.end);
        }
        loaded
    }

    fn missing_runs(&self, range: DateRange) -> Vec<DateRange> {
        let mut runs = Vec::new();
        let mut run_start: Option<NaiveDate> = None;
        let mut previous = range.start;

        for date in range.dates() {
            let missing = !self.buckets.contains_key(&date);
            match (missing, run_start) {
                (true, None) => run_start = Some(date),
                (false, Some(start)) => {
                    runs.push(DateRange::new(start, previous));
                    run_start = None;
                }
                _ => {}
            }
            previous = date;
        }
        if let Some(start) = run_start {
            runs.push(DateRange::new(start, range.end));
        }
        runs
    }

    fn covering_tot_ids(&self, date: NaiveDate) -> Vec<String> {
        let mut covering: Vec<&TotEntry> = self.tots.values().filter(|t| t.covers(date)).collect();
        covering.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        covering.into_iter().map(|t| t.id.clone()).collect()
    }

    pub fn is_loaded(&self, date: NaiveDate) -> bool {
        self.buckets.contains_key(&date)
    }

    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.buckets.get(&date)
    }

    /// The loaded buckets inside `range`, in date order.
    pub fn buckets_in(&self, range: DateRange) -> Vec<&DayBucket> {
        self.buckets.range(range.start..=range.end).map(|(_, b)| b).collect()
    }

    pub fn visit_count(&self) -> usize {
        self.buckets.values().map(|b| b.visits.len()).sum()
    }

    pub fn visits_on(&self, date: NaiveDate) -> &[VisitEntry] {
        self.buckets.get(&date).map(|b| b.visits.as_slice()).unwrap_or(&[])
    }

    /// Visits booked into one hour cell, paired with their bucket index.
    pub fn visits_at(&self, date: NaiveDate, hour: u32) -> Vec<(usize, &VisitEntry)> {
        self.visits_on(date)
            .iter()
            .enumerate()
            .filter(|(_, v)| v.hour() == hour)
            .collect()
    }

    pub fn locate_visit(&self, id: &str) -> Option<VisitLocation> {
        self.buckets.values().find_map(|bucket| {
            bucket
                .visits
                .iter()
                .position(|v| v.id == id)
                .map(|index| VisitLocation { date: bucket.date, index })
        })
    }

    pub fn tot(&self, id: &str) -> Option<&TotEntry> {
        self.tots.get(id)
    }

    pub fn tots_on(&self, date: NaiveDate) -> Vec<&TotEntry> {
        self.buckets
            .get(&date)
            .map(|b| b.tot_ids.iter().filter_map(|id| self.tots.get(id)).collect())
            .unwrap_or_default()
    }

    fn has_visit_id(&self, id: &str) -> bool {
        self.buckets.values().any(|b| b.visits.iter().any(|v| v.id == id))
    }

    fn unique_visit_id(&self, base: &str) -> String {
        if !self.has_visit_id(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.has_visit_id(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Appends a visit to the bucket of its date. Returns the id it was stored under.
    pub fn add_visit(&mut self, mut visit: VisitEntry) -> PlannerResult<String> {
        let date = visit.date();
        if !self.buckets.contains_key(&date) {
            return Err(PlannerError::DateNotLoaded(date));
        }

        visit.id = self.unique_visit_id(&visit.id);
        let id = visit.id.clone();
        if let Some(bucket) = self.buckets.get_mut(&date) {
            tracing::info!("Planned visit {} ({}) at {}", id, visit.name, visit.time);
            bucket.visits.push(visit);
        }
        Ok(id)
    }

    /// Moves a visit to another cell. `None` means the drag was cancelled.
    ///
    /// Returns whether anything changed. Within one date the visit keeps its
    /// position and only its time changes.
    pub fn move_visit(&mut self, from: VisitLocation, to: Option<DropTarget>) -> PlannerResult<bool> {
        let Some(to) = to else {
            return Ok(false);
        };

        let source = self
            .buckets
            .get(&from.date)
            .ok_or(PlannerError::DateNotLoaded(from.date))?;
        let current = source.visits.get(from.index).ok_or(PlannerError::VisitNotFound {
            date: from.date,
            index: from.index,
        })?;
        if !self.buckets.contains_key(&to.date) {
            return Err(PlannerError::DateNotLoaded(to.date));
        }

        let new_time = to.date.and_time(to.slot.time());
        if current.time == new_time {
            return Ok(false);
        }

        if from.date == to.date {
            if let Some(visit) = self
                .buckets
                .get_mut(&from.date)
                .and_then(|b| b.visits.get_mut(from.index))
            {
                tracing::info!("Rescheduled visit {} to {}", visit.id, new_time);
                visit.time = new_time;
            }
            return Ok(true);
        }

        let Some(mut visit) = self
            .buckets
            .get_mut(&from.date)
            .map(|b| b.visits.remove(from.index))
        else {
            return Ok(false);
        };
        tracing::info!("Moved visit {} from {} to {}", visit.id, visit.time, new_time);
        visit.time = new_time;
        if let Some(bucket) = self.buckets.get_mut(&to.date) {
            bucket.visits.push(visit);
        }
        Ok(true)
    }

    /// Stores a TOT once and references it from every loaded bucket it covers.
    ///
    /// Bucket ids stay ordered by start time, the same order loading produces.
    pub fn add_tot(&mut self, entry: TotEntry) -> String {
        let id = entry.id.clone();
        let range = entry.dates();
        tracing::info!(
            "Added TOT {} ({}) {}..{}",
            id,
            entry.kind.label(),
            entry.start,
            entry.end
        );
        self.removed_tots.remove(&id);
        self.tots.insert(id.clone(), entry);

        let covered: Vec<NaiveDate> = self.buckets.range(range.start..=range.end).map(|(d, _)| *d).collect();
        for date in covered {
            let ids = self.covering_tot_ids(date);
            if let Some(bucket) = self.buckets.get_mut(&date) {
                bucket.tot_ids = ids;
            }
        }
        id
    }

    /// Removes a TOT selected on `date`, from every day it spans.
    ///
    /// Does nothing when the bucket for `date` does not reference `id`. A removed id is
    /// never taken from the source again.
    pub fn remove_tot(&mut self, id: &str, date: NaiveDate) -> Option<TotEntry> {
        let referenced = self
            .buckets
            .get(&date)
            .is_some_and(|b| b.tot_ids.iter().any(|t| t == id));
        if !referenced {
            return None;
        }

        for bucket in self.buckets.values_mut() {
            bucket.tot_ids.retain(|t| t != id);
        }
        self.removed_tots.insert(id.to_string());
        let removed = self.tots.remove(id);
        if removed.is_some() {
            tracing::info!("Removed TOT {}", id);
        }
        removed
    }
}
