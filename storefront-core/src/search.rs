//! State of the product grid: what was searched for, what came back, and what to show.

use serde::Serialize;
use storefront_types::Product;

use crate::api::ApiError;
use crate::catalog::SearchResults;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    /// The service said nothing matches. Show "No products found" instead of the grid.
    Empty,
    Ready,
}

/// Issued by [`SearchState::begin`]. Only the most recent ticket may write results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct SearchTicket(u64);

/// What [`SearchState::apply`] did with a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Updated,
    /// A newer request was issued after this one; the response was discarded.
    Stale,
    /// The request failed. Results and the settled status are untouched.
    Failed(ApiError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// The query `results` answer. Updated when a response is applied, not when it is sent.
    pub query: String,
    pub results: Vec<Product>,
    pub status: SearchStatus,
    // last status that wasn't Loading, restored when a request fails
    settled: SearchStatus,
    // query of the request currently in flight
    requested: String,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request for `query` as in flight. Supersedes every earlier ticket.
    pub fn begin(&mut self, query: impl Into<String>) -> SearchTicket {
        self.generation += 1;
        self.requested = query.into();
        self.status = SearchStatus::Loading;
        SearchTicket(self.generation)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn apply(
        &mut self,
        ticket: SearchTicket,
        result: Result<SearchResults, ApiError>,
    ) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }

        match result {
            Ok(SearchResults::Found(products)) => {
                self.results = products;
                self.settle(SearchStatus::Ready);
                Applied::Updated
            }
            Ok(SearchResults::NoMatches) => {
                self.results.clear();
                self.settle(SearchStatus::Empty);
                Applied::Updated
            }
            Err(e) => {
                self.status = self.settled;
                Applied::Failed(e)
            }
        }
    }

    /// Whether the product grid should be drawn, as opposed to a spinner or "no results".
    pub fn shows_grid(&self) -> bool {
        matches!(self.status, SearchStatus::Ready | SearchStatus::Idle)
    }

    fn settle(&mut self, status: SearchStatus) {
        self.query = std::mem::take(&mut self.requested);
        self.status = status;
        self.settled = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            category: "Phones".to_string(),
            cost: 100.0,
            rating: 4,
            image_url: String::new(),
        }
    }

    #[test]
    fn test_found_results_are_ready() {
        let mut state = SearchState::new();
        let ticket = state.begin("phone");
        assert_eq!(state.status, SearchStatus::Loading);
        assert!(!state.shows_grid());

        let applied = state.apply(ticket, Ok(SearchResults::Found(vec![product("A")])));
        assert_eq!(applied, Applied::Updated);
        assert_eq!(state.status, SearchStatus::Ready);
        assert_eq!(state.query, "phone");
        assert_eq!(state.results, vec![product("A")]);
        assert!(state.shows_grid());
    }

    #[test]
    fn test_not_found_is_empty_not_error() {
        let mut state = SearchState::new();
        let ticket = state.begin("zzz");
        let applied = state.apply(ticket, Ok(SearchResults::NoMatches));

        assert_eq!(applied, Applied::Updated);
        assert_eq!(state.status, SearchStatus::Empty);
        assert!(state.results.is_empty());
        assert!(!state.shows_grid());
    }

    #[test]
    fn test_empty_200_is_ready() {
        let mut state = SearchState::new();
        let ticket = state.begin("");
        state.apply(ticket, Ok(SearchResults::Found(vec![])));
        assert_eq!(state.status, SearchStatus::Ready);
    }

    #[test]
    fn test_failure_restores_previous_status() {
        let mut state = SearchState::new();
        let ticket = state.begin("phone");
        state.apply(ticket, Ok(SearchResults::Found(vec![product("A")])));

        let ticket = state.begin("phones");
        let error = ApiError::Network("connection refused".to_string());
        assert_eq!(
            state.apply(ticket, Err(error.clone())),
            Applied::Failed(error.clone())
        );
        assert_eq!(state.status, SearchStatus::Ready);
        assert_eq!(state.results, vec![product("A")]);
        assert_eq!(state.query, "phone");

        let ticket = state.begin("zzz");
        state.apply(ticket, Ok(SearchResults::NoMatches));
        let ticket = state.begin("zzzz");
        state.apply(ticket, Err(error));
        assert_eq!(state.status, SearchStatus::Empty);
    }

    #[test]
    fn test_query_follows_displayed_results() {
        let mut state = SearchState::new();
        let ticket = state.begin("phone");
        state.apply(ticket, Ok(SearchResults::Found(vec![product("A")])));

        let _ticket = state.begin("laptop");
        assert_eq!(state.status, SearchStatus::Loading);
        assert_eq!(state.query, "phone");
    }

    #[test]
    fn test_failure_after_superseded_request_does_not_stick_in_loading() {
        let mut state = SearchState::new();
        let _first = state.begin("a");
        let second = state.begin("ab");
        state.apply(second, Err(ApiError::Network("offline".to_string())));
        assert_eq!(state.status, SearchStatus::Idle);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = SearchState::new();
        let slow = state.begin("ph");
        let fast = state.begin("phone");

        state.apply(fast, Ok(SearchResults::Found(vec![product("phone")])));
        let applied = state.apply(slow, Ok(SearchResults::Found(vec![product("ph")])));

        assert_eq!(applied, Applied::Stale);
        assert_eq!(state.results, vec![product("phone")]);
        assert_eq!(state.query, "phone");
    }
}
