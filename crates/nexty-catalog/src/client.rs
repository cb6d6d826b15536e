//! HTTP client for the remote product API.
//!
//! Two endpoints: `GET {base}/categories` and `GET {base}/products` with
//! `limit` / `skip` / `q` / `sortBy` / `category` query parameters. There is
//! no retry and no caching; a request timeout applies only when configured.

use std::time::Duration;

use nexty_core::{AppConfig, ListingQuery};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::types::{CategoryEntry, ProductsResponse};

/// Client for the product API rooted at a fixed base URL.
///
/// Use [`CatalogClient::from_config`] in the binary, or
/// [`CatalogClient::new`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client for `base_url`.
    ///
    /// `timeout_secs` of `None` leaves requests without a deadline.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash, so `join("products")` appends a segment
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the category identifiers used by the category filter.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnexpectedStatus`] for any non-2xx response.
    /// - [`CatalogError::Http`] on network or TLS failure.
    /// - [`CatalogError::Deserialize`] if the body is not a category array.
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint("categories")?;
        let entries: Vec<CategoryEntry> = self.get_json(url, "category list").await?;
        let categories: Vec<String> = entries
            .into_iter()
            .filter_map(CategoryEntry::into_identifier)
            .collect();
        tracing::debug!(count = categories.len(), "fetched categories");
        Ok(categories)
    }

    /// Fetches one page of product documents for `query`.
    ///
    /// Documents are returned as raw JSON; classify and normalize them with
    /// [`crate::normalize::ProductDocument`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnexpectedStatus`] for any non-2xx response.
    /// - [`CatalogError::Http`] on network or TLS failure.
    /// - [`CatalogError::Deserialize`] if the body matches no known envelope.
    pub async fn list_products(
        &self,
        query: &ListingQuery,
    ) -> Result<Vec<serde_json::Value>, CatalogError> {
        let url = self.products_url(query)?;
        let response: ProductsResponse = self
            .get_json(url, &format!("products page {}", query.page()))
            .await?;
        let documents = response.into_documents();
        tracing::debug!(
            page = query.page(),
            count = documents.len(),
            "fetched product documents"
        );
        Ok(documents)
    }

    /// Builds the product-list URL. Empty search / sort / category values are
    /// left out rather than sent as empty parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the endpoint cannot be
    /// joined onto the base URL.
    pub(crate) fn products_url(&self, query: &ListingQuery) -> Result<Url, CatalogError> {
        let mut url = self.endpoint("products")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("limit", &query.limit().to_string())
                .append_pair("skip", &query.offset().to_string());
            if !query.search().is_empty() {
                pairs.append_pair("q", query.search());
            }
            if !query.sort().is_empty() {
                pairs.append_pair("sortBy", query.sort());
            }
            if !query.category().is_empty() {
                pairs.append_pair("category", query.category());
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|e| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
