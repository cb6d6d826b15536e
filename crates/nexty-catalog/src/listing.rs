//! Listing controller: turns a [`ListingQuery`] into fetched, normalized
//! products and tracks the view state around them.
//!
//! Every product load takes a generation number from a monotonically
//! increasing counter. A response is applied only if its generation is
//! still the newest, so a slow response for an old query can never
//! overwrite the results of a newer one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use nexty_core::{ListingQuery, PaginationControls, Product, ProductCard};
use serde_json::Value;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::normalize::{normalize_document, ProductDocument};

/// Message shown when a page has nothing to display.
pub const EMPTY_MESSAGE: &str = "No products available.";

/// Where listing data comes from. Implemented by [`CatalogClient`].
pub trait CatalogSource {
    fn categories(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    fn products(
        &self,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<Vec<Value>, CatalogError>> + Send;
}

impl CatalogSource for CatalogClient {
    fn categories(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send {
        self.list_categories()
    }

    fn products(
        &self,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<Vec<Value>, CatalogError>> + Send {
        self.list_products(query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    /// Nothing has been loaded yet.
    Idle,
    /// At least one product is displayed.
    Loaded,
    /// The fetch succeeded with zero displayable products.
    Empty,
    /// The product fetch failed. Rendered like [`ListingStatus::Empty`].
    Unavailable,
}

impl ListingStatus {
    /// Stable lowercase name, used in machine-readable output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Idle => "idle",
            ListingStatus::Loaded => "loaded",
            ListingStatus::Empty => "empty",
            ListingStatus::Unavailable => "unavailable",
        }
    }

    /// User-facing message for statuses that have no products to show.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            ListingStatus::Empty | ListingStatus::Unavailable => Some(EMPTY_MESSAGE),
            ListingStatus::Idle | ListingStatus::Loaded => None,
        }
    }
}

/// Snapshot of everything the listing page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    pub query: ListingQuery,
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub loading: bool,
    pub status: ListingStatus,
    /// Documents on the current page that failed normalization.
    pub skipped_documents: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            query: ListingQuery::default(),
            products: Vec::new(),
            categories: Vec::new(),
            loading: false,
            status: ListingStatus::Idle,
            skipped_documents: 0,
        }
    }
}

impl ListingState {
    #[must_use]
    pub fn pagination(&self) -> PaginationControls {
        PaginationControls::new(self.query.page(), self.products.len(), self.loading)
    }

    /// One freshly-mounted card per product, each gallery at image 0.
    #[must_use]
    pub fn cards(&self) -> Vec<ProductCard> {
        self.products.iter().cloned().map(ProductCard::new).collect()
    }
}

/// Result of a single [`ListingController::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was the newest and is now displayed.
    Applied {
        generation: u64,
        status: ListingStatus,
    },
    /// A newer load started before this one finished; its result was dropped.
    Stale { generation: u64 },
}

pub struct ListingController<S> {
    source: S,
    generation: AtomicU64,
    categories_requested: AtomicBool,
    state: Mutex<ListingState>,
}

impl<S: CatalogSource> ListingController<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
            categories_requested: AtomicBool::new(false),
            state: Mutex::new(ListingState::default()),
        }
    }

    /// Initial page load: categories and the first product page, fetched
    /// concurrently.
    pub async fn mount(&self, query: ListingQuery) -> LoadOutcome {
        let ((), outcome) = tokio::join!(self.load_categories(), self.load(query));
        outcome
    }

    /// Fetches the category list once per controller. Later calls are no-ops.
    ///
    /// A failure is logged and leaves the category list empty.
    pub async fn load_categories(&self) {
        if self.categories_requested.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.source.categories().await {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "loaded categories");
                self.lock_state().categories = categories;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch categories; category filter left empty");
            }
        }
    }

    /// Fetches and normalizes the product page for `query`.
    ///
    /// `loading` is set before the request and cleared once the newest
    /// request resolves. Documents that fail normalization are skipped and
    /// logged. A failed fetch is logged and shown as
    /// [`ListingStatus::Unavailable`].
    ///
    /// Dropping the returned future before it resolves puts the previous
    /// query back and clears `loading`, unless a newer load has started.
    pub async fn load(&self, query: ListingQuery) -> LoadOutcome {
        // Generation and query are published under one lock so the newest
        // generation always belongs to the query shown in state.
        let (generation, previous_query) = {
            let mut state = self.lock_state();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let previous_query = std::mem::replace(&mut state.query, query.clone());
            state.loading = true;
            (generation, previous_query)
        };
        let mut in_flight = InFlightLoad {
            generation_counter: &self.generation,
            state: &self.state,
            generation,
            previous_query: Some(previous_query),
        };

        let fetched = self.source.products(&query).await;
        in_flight.settle();

        let (products, skipped, status) = match fetched {
            Ok(documents) => {
                let (products, skipped) = normalize_page(documents);
                let status = if products.is_empty() {
                    ListingStatus::Empty
                } else {
                    ListingStatus::Loaded
                };
                (products, skipped, status)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    page = query.page(),
                    search = query.search(),
                    category = query.category(),
                    "failed to fetch products"
                );
                (Vec::new(), 0, ListingStatus::Unavailable)
            }
        };

        let mut state = self.lock_state();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale product response");
            return LoadOutcome::Stale { generation };
        }

        state.products = products;
        state.skipped_documents = skipped;
        state.status = status;
        state.loading = false;
        LoadOutcome::Applied { generation, status }
    }

    /// Copy of the current view state.
    #[must_use]
    pub fn snapshot(&self) -> ListingState {
        self.lock_state().clone()
    }

    #[must_use]
    pub fn pagination(&self) -> PaginationControls {
        self.lock_state().pagination()
    }

    /// Query for the Next button, or `None` while it is disabled.
    #[must_use]
    pub fn next_query(&self) -> Option<ListingQuery> {
        let state = self.lock_state();
        state
            .pagination()
            .next_enabled
            .then(|| state.query.next_page())
    }

    /// Query for the Previous button, or `None` while it is disabled.
    #[must_use]
    pub fn previous_query(&self) -> Option<ListingQuery> {
        let state = self.lock_state();
        state
            .pagination()
            .previous_enabled
            .then(|| state.query.previous_page())
    }

    /// Query for "Reset All Filters": always the default query.
    #[must_use]
    pub fn reset_query(&self) -> ListingQuery {
        self.lock_state().query.reset()
    }

    fn lock_state(&self) -> MutexGuard<'_, ListingState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<ListingState>) -> MutexGuard<'_, ListingState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Undoes the start of a load whose future is dropped before the fetch
/// resolves.
struct InFlightLoad<'a> {
    generation_counter: &'a AtomicU64,
    state: &'a Mutex<ListingState>,
    generation: u64,
    previous_query: Option<ListingQuery>,
}

impl InFlightLoad<'_> {
    fn settle(&mut self) {
        self.previous_query = None;
    }
}

impl Drop for InFlightLoad<'_> {
    fn drop(&mut self) {
        let Some(previous_query) = self.previous_query.take() else {
            return;
        };
        let mut state = lock(self.state);
        if self.generation_counter.load(Ordering::SeqCst) == self.generation {
            tracing::debug!(generation = self.generation, "product load cancelled");
            state.query = previous_query;
            state.loading = false;
        }
    }
}

/// Classifies and normalizes every document, dropping the ones that fail.
/// Returns the products and the number of documents skipped.
fn normalize_page(documents: Vec<Value>) -> (Vec<Product>, usize) {
    let mut products = Vec::with_capacity(documents.len());
    let mut skipped = 0usize;

    for (position, raw) in documents.into_iter().enumerate() {
        match ProductDocument::from_value(raw).and_then(normalize_document) {
            Ok(product) => products.push(product),
            Err(e) => {
                skipped += 1;
                tracing::warn!(position, error = %e, "skipping malformed product document");
            }
        }
    }

    (products, skipped)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalize_page_skips_malformed_documents() {
        let (products, skipped) = normalize_page(vec![
            json!({"id": 1, "title": "Plain", "price": 2.5}),
            json!({"id": {"integerValue": "2"}}),
            json!(17),
        ]);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Plain");
        assert_eq!(skipped, 2);
    }

    #[test]
    fn empty_and_unavailable_share_a_message() {
        assert_eq!(ListingStatus::Empty.message(), Some(EMPTY_MESSAGE));
        assert_eq!(ListingStatus::Unavailable.message(), Some(EMPTY_MESSAGE));
        assert_eq!(ListingStatus::Loaded.message(), None);
        assert_eq!(ListingStatus::Idle.message(), None);
    }

    #[test]
    fn status_names_are_stable() {
        assert_eq!(ListingStatus::Idle.as_str(), "idle");
        assert_eq!(ListingStatus::Loaded.as_str(), "loaded");
        assert_eq!(ListingStatus::Empty.as_str(), "empty");
        assert_eq!(ListingStatus::Unavailable.as_str(), "unavailable");
    }

    #[test]
    fn default_state_is_idle_on_first_page() {
        let state = ListingState::default();
        assert_eq!(state.status, ListingStatus::Idle);
        assert!(state.query.is_default());
        let controls = state.pagination();
        assert!(!controls.previous_enabled);
        assert!(!controls.next_enabled);
    }
}
