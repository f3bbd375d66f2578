/// Search session state
///
/// Tracks the active query, the page counter, the accumulated results and
/// the request status, and decides when a page must be fetched, appended
/// or thrown away. The UI never mutates these fields directly.

use std::ops::Range;

use super::data::GalleryItem;
use crate::api::SearchResponse;

/// Shown when a page comes back without any hits
pub const NO_RESULTS_MESSAGE: &str = "No images match this search, try a different query";

/// Request status, drives which controls the UI shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Resolved,
    Rejected(String),
}

/// One page the session wants fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Sequence number, increases with every request issued
    pub seq: u64,
    pub query: String,
    pub page: u32,
}

/// What a submit from the search bar turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    /// Blank input, nothing was changed
    Empty,
    /// Same query as the active one, nothing was changed
    Unchanged,
    /// New query, results were reset and page 1 must be fetched
    Fetch(PageRequest),
}

/// Result of applying a response to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Response belongs to an older request and was dropped
    Stale,
    /// Items in this index range were appended
    Appended(Range<usize>),
    Rejected(String),
}

/// Trim and lowercase raw input. Returns None for blank input.
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    page: u32,
    items: Vec<GalleryItem>,
    total: u64,
    status: Status,
    last_seq: u64,
    in_flight: Option<u64>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current 1-based page, 0 before the first search
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    pub fn find(&self, id: u64) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Handle a submit from the search bar
    pub fn submit(&mut self, raw: &str) -> Submit {
        let Some(query) = normalize_query(raw) else {
            return Submit::Empty;
        };
        if query == self.query {
            return Submit::Unchanged;
        }

        self.query = query;
        self.page = 1;
        self.items.clear();
        self.total = 0;
        Submit::Fetch(self.issue())
    }

    /// The "Load more" control is only offered while this holds
    pub fn can_load_more(&self) -> bool {
        self.status == Status::Resolved
            && !self.items.is_empty()
            && (self.items.len() as u64) < self.total
    }

    /// Advance to the next page, if there is one to load
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// Apply the response for `request`
    pub fn apply(
        &mut self,
        request: &PageRequest,
        result: Result<SearchResponse, String>,
    ) -> Outcome {
        if self.in_flight != Some(request.seq) {
            tracing::debug!(
                "⏭️  Dropping stale response for \"{}\" page {}",
                request.query,
                request.page
            );
            return Outcome::Stale;
        }
        self.in_flight = None;

        let response = match result {
            Ok(response) => response,
            Err(message) => return self.reject(message),
        };
        if response.hits.is_empty() {
            return self.reject(NO_RESULTS_MESSAGE.to_string());
        }

        let start = self.items.len();
        self.items
            .extend(response.hits.into_iter().map(GalleryItem::from));
        self.total = response.total_hits;
        self.status = Status::Resolved;
        Outcome::Appended(start..self.items.len())
    }

    fn issue(&mut self) -> PageRequest {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);
        self.status = Status::Pending;
        PageRequest {
            seq: self.last_seq,
            query: self.query.clone(),
            page: self.page,
        }
    }

    fn reject(&mut self, message: String) -> Outcome {
        tracing::warn!("⚠️  Search \"{}\" page {} failed: {}", self.query, self.page, message);
        self.status = Status::Rejected(message.clone());
        Outcome::Rejected(message)
    }
}
