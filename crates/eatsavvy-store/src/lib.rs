//! EatSavvy Directory Store
//!
//! Session-scoped, in-memory state of the directory client: the loaded
//! restaurant records, the active free-text query, the selection set and the
//! transient request flags.
//!
//! # State transitions
//!
//! - [`DirectoryStore::replace`]: install a full list or server search results
//! - [`DirectoryStore::set_query`] / [`local_filter`]: narrow the visible set locally
//! - selection: [`select`](DirectoryStore::select), [`deselect`](DirectoryStore::deselect),
//!   [`toggle_select`](DirectoryStore::toggle_select),
//!   [`select_all_visible`](DirectoryStore::select_all_visible)
//! - [`DirectoryStore::merge_enrichment`]: patch records returned by enrichment
//!
//! Every transition is applied in full or not at all, and none of them can
//! fail. Fetch failures belong to the caller, which simply does not invoke a
//! transition.
//!
//! # Examples
//!
//! ```
//! use eatsavvy_domain::{Restaurant, RestaurantId};
//! use eatsavvy_store::DirectoryStore;
//!
//! let id = RestaurantId::new("5").unwrap();
//! let mut store = DirectoryStore::new();
//! store.replace(vec![Restaurant::new(id.clone(), "Pizzeria Uno")]);
//!
//! store.toggle_select(id.clone());
//! assert!(store.is_selected(&id));
//! assert_eq!(store.visible().len(), 1);
//! ```

#![warn(missing_docs)]

mod filter;
mod hours_cache;
mod selection;

pub use filter::local_filter;
pub use hours_cache::HoursCache;
pub use selection::Selection;

use eatsavvy_domain::{is_open_now, GroupedHours, Restaurant, RestaurantId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Transient request flags shown alongside the data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    /// A reload or search is outstanding
    pub loading: bool,

    /// An enrichment request is outstanding
    pub enriching: bool,

    /// Message of the last failed request, cleared by the next success
    pub last_error: Option<String>,
}

/// Result of a select-all toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllOutcome {
    /// Every visible id was already selected, so the selection was cleared
    Cleared,

    /// The selection now holds exactly the visible ids
    SelectedVisible,

    /// Nothing is visible; the selection was left alone
    Unchanged,
}

/// What an enrichment merge touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Ids whose records were replaced
    pub updated: Vec<RestaurantId>,

    /// Ids returned by enrichment that are not loaded
    pub ignored: Vec<RestaurantId>,
}

/// Header counts for the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Records passing the local filter
    pub visible: usize,

    /// Ids in the selection set
    pub selected: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.visible == 1 { "result" } else { "results" };
        write!(f, "{} {} found", self.visible, noun)?;
        if self.selected > 0 {
            write!(f, " · {} selected", self.selected)?;
        }
        Ok(())
    }
}

/// Authoritative record set, query and selection of one directory session
///
/// Single owner: the store has no internal locking. Derived views
/// (filtering, grouped hours, open state) are computed on demand.
#[derive(Debug, Default)]
pub struct DirectoryStore {
    records: Vec<Restaurant>,
    index: HashMap<RestaurantId, usize>,
    query: String,
    selection: Selection,
    status: StoreStatus,
    hours_cache: HoursCache,
}

impl DirectoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new record set, discarding the previous one
    ///
    /// Used for both the full listing and server-side search results. The
    /// query text is kept, so the local filter now applies to the new base
    /// set. The selection is kept too; ids that are no longer loaded stay
    /// selected but inert. A repeated id keeps its first occurrence.
    pub fn replace(&mut self, records: Vec<Restaurant>) {
        let mut kept = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            if index.contains_key(&record.id) {
                warn!(id = %record.id, "Dropping duplicate restaurant id in replacement set");
                continue;
            }
            index.insert(record.id.clone(), kept.len());
            kept.push(record);
        }

        let live: HashSet<RestaurantId> = index.keys().cloned().collect();
        self.hours_cache.retain_ids(&live);
        self.records = kept;
        self.index = index;

        debug!(
            records = self.records.len(),
            selected = self.selection.len(),
            "Replaced directory records"
        );
    }

    /// Patch records returned by an enrichment request
    ///
    /// Each loaded record whose id matches is replaced by the returned
    /// version. Returned ids that are not loaded are ignored; records are
    /// never inserted. Clearing the selection afterwards is the caller's step.
    pub fn merge_enrichment(&mut self, updated: Vec<Restaurant>) -> MergeReport {
        let mut report = MergeReport::default();

        for record in updated {
            match self.index.get(&record.id) {
                Some(&position) => {
                    self.hours_cache.invalidate(&record.id);
                    report.updated.push(record.id.clone());
                    self.records[position] = record;
                }
                None => report.ignored.push(record.id),
            }
        }

        debug!(
            updated = report.updated.len(),
            ignored = report.ignored.len(),
            "Merged enrichment results"
        );
        if !report.ignored.is_empty() {
            debug!(ignored = ?report.ignored, "Enrichment returned ids that are not loaded");
        }

        report
    }

    /// All loaded records in display order
    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    /// Look up a loaded record
    pub fn get(&self, id: &RestaurantId) -> Option<&Restaurant> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Number of loaded records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is loaded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Active free-text query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Set the free-text query; purely local, nothing is fetched
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Records passing the active query, in display order
    pub fn visible(&self) -> Vec<&Restaurant> {
        local_filter(&self.records, &self.query)
    }

    /// Ids of the visible records, in display order
    pub fn visible_ids(&self) -> Vec<RestaurantId> {
        self.visible().into_iter().map(|r| r.id.clone()).collect()
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether an id is selected
    pub fn is_selected(&self, id: &RestaurantId) -> bool {
        self.selection.contains(id)
    }

    /// Add an id to the selection
    pub fn select(&mut self, id: RestaurantId) {
        self.selection.select(id);
    }

    /// Remove an id from the selection
    pub fn deselect(&mut self, id: &RestaurantId) {
        self.selection.deselect(id);
    }

    /// Flip an id's membership, returning whether it is now selected
    pub fn toggle_select(&mut self, id: RestaurantId) -> bool {
        self.selection.toggle(id)
    }

    /// Select-all checkbox behaviour
    ///
    /// When every visible record is already selected the selection is
    /// cleared; otherwise it becomes exactly the visible ids, dropping any
    /// inert ids left over from earlier record sets. With nothing visible the
    /// selection is untouched.
    pub fn select_all_visible(&mut self) -> SelectAllOutcome {
        let visible = self.visible_ids();
        if visible.is_empty() {
            return SelectAllOutcome::Unchanged;
        }

        let covered = visible.iter().filter(|id| self.selection.contains(id)).count();
        if covered == visible.len() {
            self.selection.clear();
            SelectAllOutcome::Cleared
        } else {
            self.selection.replace_with(visible);
            SelectAllOutcome::SelectedVisible
        }
    }

    /// Whether the select-all checkbox shows as checked
    pub fn all_visible_selected(&self) -> bool {
        let visible = self.visible();
        !visible.is_empty() && visible.iter().all(|r| self.selection.contains(&r.id))
    }

    /// Empty the selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Grouped local hours for a loaded record
    ///
    /// `None` when the id is not loaded. A record with unknown hours yields an
    /// empty mapping; check [`Restaurant::hours_known`] to tell the two apart.
    pub fn hours_view(&mut self, id: &RestaurantId, utc_offset_minutes: i32) -> Option<Arc<GroupedHours>> {
        let position = *self.index.get(id)?;
        Some(
            self.hours_cache
                .get_or_compute(&self.records[position], utc_offset_minutes),
        )
    }

    /// Whether a loaded record is open at the given local instant
    pub fn is_open_now(
        &mut self,
        id: &RestaurantId,
        utc_offset_minutes: i32,
        now_local_weekday: u8,
        now_minute_of_day: u16,
    ) -> Option<bool> {
        self.hours_view(id, utc_offset_minutes)
            .map(|grouped| is_open_now(&grouped, now_local_weekday, now_minute_of_day))
    }

    /// Transient request flags
    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    /// Mutable request flags, for the orchestration layer
    pub fn status_mut(&mut self) -> &mut StoreStatus {
        &mut self.status
    }

    /// Visible and selected counts
    pub fn summary(&self) -> Summary {
        Summary {
            visible: self.visible().len(),
            selected: self.selection.len(),
        }
    }

    /// Hours cache statistics, `(hits, misses)`
    pub fn hours_cache_stats(&self) -> (u64, u64) {
        self.hours_cache.stats()
    }
}
