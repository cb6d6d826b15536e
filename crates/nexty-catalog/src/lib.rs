pub mod client;
pub mod document;
pub mod error;
pub mod listing;
pub mod normalize;
pub mod types;

pub use client::CatalogClient;
pub use document::{TypedDocument, TypedValue};
pub use error::CatalogError;
pub use listing::{
    CatalogSource, ListingController, ListingState, ListingStatus, LoadOutcome, EMPTY_MESSAGE,
};
pub use normalize::{normalize_document, normalize_product, ProductDocument};
