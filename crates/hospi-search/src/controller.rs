//! View state for a hospital search screen.
//!
//! Every search is tagged with a sequence number when it starts. When the
//! response arrives it is applied only if no newer search has started since;
//! otherwise it is dropped. The lock is never held across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hospi_core::{Coordinates, Hospital, SearchFilters};
use serde::Serialize;

use crate::geolocation::{resolve_position, GeolocationProvider};
use crate::synthesizer::{HospitalSearch, SearchResults};
use crate::SearchError;

/// Shown for every failed search, whatever the cause.
pub const SEARCH_FAILED_MESSAGE: &str = "Healthcare service lookup interrupted. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ViewState {
    Idle,
    Loading,
    Success { hospitals: Vec<Hospital> },
    Error { message: String },
}

/// Whether a finished search changed the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied,
    /// A newer search started before this one resolved; its result was dropped.
    Superseded,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    pub state: ViewState,
    /// The last successfully executed query and location.
    pub filters: SearchFilters,
    pub coordinates: Option<Coordinates>,
    /// Tag of the most recently started search; 0 before the first one.
    pub sequence: u64,
}

struct ControllerState {
    view: ViewState,
    filters: SearchFilters,
    coordinates: Option<Coordinates>,
    latest: u64,
}

pub struct SearchController<S> {
    searcher: S,
    state: Mutex<ControllerState>,
}

impl<S: HospitalSearch> SearchController<S> {
    #[must_use]
    pub fn new(searcher: S, filters: SearchFilters) -> Self {
        Self {
            searcher,
            state: Mutex::new(ControllerState {
                view: ViewState::Idle,
                filters,
                coordinates: None,
                latest: 0,
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        let state = self.lock();
        SearchSnapshot {
            state: state.view.clone(),
            filters: state.filters.clone(),
            coordinates: state.coordinates,
            sequence: state.latest,
        }
    }

    /// Records the device position. Searches already in flight keep the
    /// coordinates they started with.
    pub fn set_coordinates(&self, coordinates: Option<Coordinates>) {
        self.lock().coordinates = coordinates;
    }

    /// Resolves `provider` and records the position if one is available.
    /// Failures are logged and leave the current coordinates untouched.
    pub async fn locate<G: GeolocationProvider>(&self, provider: &G) {
        if let Some(coordinates) = resolve_position(provider).await {
            self.set_coordinates(Some(coordinates));
        }
    }

    /// Initial search with the held filters.
    pub async fn mount(&self) -> SearchOutcome {
        let (query, location) = self.current_query();
        self.search(&query, &location).await
    }

    /// Repeats the last executed query and location.
    pub async fn retry(&self) -> SearchOutcome {
        let (query, location) = self.current_query();
        self.search(&query, &location).await
    }

    /// Searches for `category` at the held location.
    pub async fn search_category(&self, category: &str) -> SearchOutcome {
        let (_, location) = self.current_query();
        self.search(category, &location).await
    }

    pub async fn search(&self, query: &str, location: &str) -> SearchOutcome {
        let (ticket, filters, coordinates) = self.begin(query, location);
        let result = self.searcher.search(&filters, coordinates).await;
        self.finish(ticket, filters, result)
    }

    fn begin(&self, query: &str, location: &str) -> (u64, SearchFilters, Option<Coordinates>) {
        let mut state = self.lock();
        state.latest += 1;
        state.view = ViewState::Loading;
        let filters = state.filters.with_query(query, location);
        tracing::debug!(sequence = state.latest, query, location, "search started");
        (state.latest, filters, state.coordinates)
    }

    fn finish(
        &self,
        ticket: u64,
        filters: SearchFilters,
        result: Result<SearchResults, SearchError>,
    ) -> SearchOutcome {
        let mut state = self.lock();
        if ticket != state.latest {
            tracing::debug!(
                sequence = ticket,
                latest = state.latest,
                "discarding superseded search result"
            );
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(results) => {
                state.view = ViewState::Success {
                    hospitals: results.hospitals,
                };
                state.filters = filters;
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    configuration = e.is_configuration(),
                    query = %filters.query,
                    location = %filters.location,
                    "hospital search failed"
                );
                state.view = ViewState::Error {
                    message: SEARCH_FAILED_MESSAGE.to_string(),
                };
            }
        }
        SearchOutcome::Applied
    }

    fn current_query(&self) -> (String, String) {
        let state = self.lock();
        (state.filters.query.clone(), state.filters.location.clone())
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
