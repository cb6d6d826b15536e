//! Listing query: the search / sort / category / page tuple that selects a
//! page of products.
//!
//! A `ListingQuery` is an immutable value. Navigation never mutates one in
//! place; it produces a new query that supersedes the old.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::pagination::{page_offset, PAGE_SIZE};

/// Characters left unescaped in query values (RFC 3986 unreserved set).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    search: String,
    sort: String,
    category: String,
    page: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: String::new(),
            category: String::new(),
            page: 1,
        }
    }
}

impl ListingQuery {
    /// Builds a query; a `page` of 0 is clamped to 1.
    #[must_use]
    pub fn new(
        search: impl Into<String>,
        sort: impl Into<String>,
        category: impl Into<String>,
        page: u32,
    ) -> Self {
        Self {
            search: search.into(),
            sort: sort.into(),
            category: category.into(),
            page: page.max(1),
        }
    }

    /// Parses a URL query string such as `?search=phone&page=2`.
    ///
    /// Unknown keys are ignored. `page` is read from its leading digits, so
    /// `3.7` and `2abc` select pages 3 and 2. A missing, non-numeric, or zero
    /// `page` falls back to 1. When a key repeats, the first occurrence wins.
    #[must_use]
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.trim_start_matches('?');
        let mut search = None;
        let mut sort = None;
        let mut category = None;
        let mut page = None;

        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value);
            let slot = match decode_component(key).as_str() {
                "search" => &mut search,
                "sort" => &mut sort,
                "category" => &mut category,
                "page" => &mut page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        let page = page.as_deref().and_then(leading_page_number).unwrap_or(1);

        Self::new(
            search.unwrap_or_default(),
            sort.unwrap_or_default(),
            category.unwrap_or_default(),
            page,
        )
    }

    /// Serializes the query back into URL form, omitting defaulted fields.
    ///
    /// The default query serializes to an empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("search", self.search.as_str()),
            ("sort", self.sort.as_str()),
            ("category", self.category.as_str()),
        ] {
            if !value.is_empty() {
                pairs.push(format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)));
            }
        }
        if self.page > 1 {
            pairs.push(format!("page={}", self.page));
        }
        pairs.join("&")
    }

    /// Storefront location for this query: `/` or `/?...`.
    #[must_use]
    pub fn to_href(&self) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            "/".to_owned()
        } else {
            format!("/?{qs}")
        }
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn sort(&self) -> &str {
        &self.sort
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of products requested per page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        PAGE_SIZE
    }

    /// Number of products skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        page_offset(self.page)
    }

    /// Same filters, different page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn next_page(&self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    #[must_use]
    pub fn previous_page(&self) -> Self {
        self.with_page(self.page.saturating_sub(1))
    }

    /// New search text; returns to page 1.
    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self.clone()
        }
    }

    /// New sort key; returns to page 1.
    #[must_use]
    pub fn with_sort(&self, sort: impl Into<String>) -> Self {
        Self {
            sort: sort.into(),
            page: 1,
            ..self.clone()
        }
    }

    /// New category filter; returns to page 1.
    #[must_use]
    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            page: 1,
            ..self.clone()
        }
    }

    /// Clears every filter: no search, no sort, all categories, page 1.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// `true` when no filter is applied and the query is on page 1.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Leading decimal digits of `raw`, ignoring leading whitespace.
fn leading_page_number(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}
