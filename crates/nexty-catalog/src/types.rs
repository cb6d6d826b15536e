//! Response envelopes for the product API.
//!
//! The API's response schema is an external contract we only partly know,
//! so these types accept the handful of shapes seen in practice and nothing
//! else.
//!
//! ### `GET /categories`
//! A JSON array. Elements are either bare identifiers (`"beauty"`) or
//! objects carrying a `slug` (`{"slug": "beauty", "name": "Beauty", "url":
//! "..."}`). The slug is the value later sent back as `category=`.
//!
//! ### `GET /products`
//! Either a bare JSON array of documents, an object with a `products` array
//! (alongside `total` / `skip` / `limit`, which we ignore), or a Firestore
//! list response with a `documents` array. Document elements are kept as raw
//! JSON here and classified one by one during normalization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    Slug(String),
    Detailed {
        slug: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl CategoryEntry {
    /// The identifier to filter by: the bare string, the slug, or failing
    /// that the display name.
    #[must_use]
    pub fn into_identifier(self) -> Option<String> {
        match self {
            CategoryEntry::Slug(s) => Some(s),
            CategoryEntry::Detailed { slug, name } => slug.or(name),
        }
        .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductsResponse {
    List(Vec<serde_json::Value>),
    Products { products: Vec<serde_json::Value> },
    Documents { documents: Vec<serde_json::Value> },
}

impl ProductsResponse {
    #[must_use]
    pub fn into_documents(self) -> Vec<serde_json::Value> {
        match self {
            ProductsResponse::List(docs)
            | ProductsResponse::Products { products: docs }
            | ProductsResponse::Documents { documents: docs } => docs,
        }
    }
}
