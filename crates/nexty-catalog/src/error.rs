use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed document at `{field}`: {reason}")]
    MalformedDocument { field: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl CatalogError {
    /// `true` for failures of the request itself: network errors, non-2xx
    /// statuses, and bodies that are not the expected JSON. Status classes
    /// are not distinguished.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Http(_)
                | CatalogError::UnexpectedStatus { .. }
                | CatalogError::Deserialize { .. }
        )
    }

    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::MalformedDocument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Re-roots a `MalformedDocument` field path under `prefix`, so an error
    /// raised inside a nested map reads `reviews[1].rating`.
    #[must_use]
    pub(crate) fn within(self, prefix: &str) -> Self {
        match self {
            CatalogError::MalformedDocument { field, reason } => CatalogError::MalformedDocument {
                field: format!("{prefix}.{field}"),
                reason,
            },
            other => other,
        }
    }
}
