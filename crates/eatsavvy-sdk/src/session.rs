//! Directory session: drives a [`DirectoryStore`] from a [`DirectoryService`].
//!
//! Requests are split into a `begin_*` step that marks the store busy and a
//! `complete_*` step that applies the response. The async helpers chain the
//! two; callers that run requests concurrently use the steps directly.

use crate::error::Result;
use crate::service::DirectoryService;
use eatsavvy_domain::{Restaurant, RestaurantId};
use eatsavvy_store::{DirectoryStore, MergeReport};
use tracing::{debug, error, warn};

/// Identifies one reload or search request
///
/// Only the most recently issued ticket may apply its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// What happened to a completed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the loaded records
    Applied {
        /// Number of records installed
        records: usize,
    },

    /// A newer request was issued; the response was discarded
    Stale,
}

/// A store paired with the service that feeds it
pub struct DirectorySession<S> {
    service: S,
    store: DirectoryStore,
    latest_ticket: u64,
}

impl<S: DirectoryService> DirectorySession<S> {
    /// Create a session with an empty store
    pub fn new(service: S) -> Self {
        Self {
            service,
            store: DirectoryStore::new(),
            latest_ticket: 0,
        }
    }

    /// The backing service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Current directory state
    pub fn store(&self) -> &DirectoryStore {
        &self.store
    }

    /// Mutable directory state, for local-only transitions
    pub fn store_mut(&mut self) -> &mut DirectoryStore {
        &mut self.store
    }

    /// Issue a ticket for a new reload or search
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.store.status_mut().loading = true;
        LoadTicket(self.latest_ticket)
    }

    /// Apply the response for `ticket`
    ///
    /// Responses for superseded tickets are dropped without touching records,
    /// flags or `last_error`. A failure for the latest ticket is recorded in
    /// `last_error` and returned; the loaded records stay as they were.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Restaurant>>,
    ) -> Result<LoadOutcome> {
        if ticket.0 != self.latest_ticket {
            warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding response for superseded request"
            );
            return Ok(LoadOutcome::Stale);
        }

        self.store.status_mut().loading = false;
        match result {
            Ok(records) => {
                let count = records.len();
                self.store.replace(records);
                self.store.status_mut().last_error = None;
                debug!(ticket = ticket.0, records = count, "Applied load response");
                Ok(LoadOutcome::Applied { records: count })
            }
            Err(e) => {
                error!(ticket = ticket.0, error = %e, "Load failed");
                self.store.status_mut().last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the full list and install it
    pub async fn reload(&mut self) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let result = self.service.list_all().await;
        self.complete_load(ticket, result)
    }

    /// Submit a search
    ///
    /// Once the results are applied the query also becomes the local filter
    /// text. A blank query reloads the full list instead of calling the
    /// search endpoint.
    pub async fn submit_search(&mut self, query: &str) -> Result<LoadOutcome> {
        let ticket = self.begin_load();

        let trimmed = query.trim();
        let result = if trimmed.is_empty() {
            self.service.list_all().await
        } else {
            self.service.search(trimmed).await
        };
        self.complete_search(ticket, query, result)
    }

    /// Apply the response for a search issued under `ticket`
    ///
    /// The query is installed only together with the results. Failed and
    /// superseded searches leave both the records and the query untouched.
    pub fn complete_search(
        &mut self,
        ticket: LoadTicket,
        query: &str,
        result: Result<Vec<Restaurant>>,
    ) -> Result<LoadOutcome> {
        let outcome = self.complete_load(ticket, result)?;
        if let LoadOutcome::Applied { .. } = outcome {
            self.store.set_query(query);
        }
        Ok(outcome)
    }

    /// Mark an enrichment as in flight and return the ids to send
    ///
    /// `None` when nothing is selected or an enrichment is already running.
    pub fn begin_enrich(&mut self) -> Option<Vec<RestaurantId>> {
        if self.store.status().enriching {
            debug!("Enrichment already in flight");
            return None;
        }
        if self.store.selection().is_empty() {
            return None;
        }

        let selection = self.store.selection();
        let already_active = selection
            .iter()
            .filter(|id| {
                self.store
                    .get(id)
                    .is_some_and(|r| r.enrichment_status.is_active())
            })
            .count();
        if already_active > 0 {
            warn!(
                count = already_active,
                "Requesting enrichment for records already queued or in progress"
            );
        }
        let ids = selection.to_vec();

        self.store.status_mut().enriching = true;
        Some(ids)
    }

    /// Apply an enrichment response
    ///
    /// On success the returned records are merged and the whole selection is
    /// cleared, including ids selected after [`begin_enrich`](Self::begin_enrich)
    /// that were never sent. On failure the selection and records are kept so
    /// the user can retry.
    pub fn complete_enrich(&mut self, result: Result<Vec<Restaurant>>) -> Result<MergeReport> {
        self.store.status_mut().enriching = false;
        match result {
            Ok(records) => {
                let report = self.store.merge_enrichment(records);
                self.store.clear_selection();
                self.store.status_mut().last_error = None;
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Enrichment failed");
                self.store.status_mut().last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Enrich the selected records
    ///
    /// Returns `Ok(None)` without a request when there is nothing to send.
    pub async fn enrich_selected(&mut self) -> Result<Option<MergeReport>> {
        let Some(ids) = self.begin_enrich() else {
            return Ok(None);
        };
        let result = self.service.enrich(&ids).await;
        self.complete_enrich(result).map(Some)
    }
}
