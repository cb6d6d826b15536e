//! Normalization from typed documents to [`nexty_core::Product`].
//!
//! Each field is read through the single tag it is expected to carry. A
//! missing field or a different tag fails the whole document with
//! [`CatalogError::MalformedDocument`]; no placeholder values are
//! substituted. `price` and `rating` are passed through without range checks.

use nexty_core::{Product, Review};
use serde_json::Value;

use crate::document::{json_kind, TypedDocument};
use crate::error::CatalogError;

/// One element of a product-list response, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductDocument {
    /// Firestore-shaped document, bare or taken from a `{"fields": ...}` envelope.
    Typed(TypedDocument),
    /// A product object that is already flat.
    Plain(Product),
}

impl ProductDocument {
    /// Classifies one raw JSON element.
    ///
    /// - an object with an object-valued `fields` key is a Firestore envelope;
    /// - an object whose values look like `{"<type>Value": ...}` wrappers is a
    ///   bare typed document;
    /// - anything else must deserialize as a plain product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] when the element matches
    /// none of these shapes.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Some(object) = value.as_object() else {
            return Err(CatalogError::malformed(
                "<document>",
                format!("expected a JSON object, found {}", json_kind(&value)),
            ));
        };

        if let Some(fields @ Value::Object(_)) = object.get("fields") {
            return TypedDocument::from_json(fields.clone()).map(ProductDocument::Typed);
        }

        if object.values().any(is_typed_wrapper) {
            return TypedDocument::from_json(value).map(ProductDocument::Typed);
        }

        serde_json::from_value::<Product>(value)
            .map(ProductDocument::Plain)
            .map_err(|e| CatalogError::malformed("<document>", e.to_string()))
    }
}

fn is_typed_wrapper(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|o| o.len() == 1 && o.keys().all(|k| k.ends_with("Value")))
}

/// Normalizes either document shape into a [`Product`].
///
/// # Errors
///
/// Propagates [`CatalogError::MalformedDocument`] from [`normalize_product`].
pub fn normalize_document(document: ProductDocument) -> Result<Product, CatalogError> {
    match document {
        ProductDocument::Typed(doc) => normalize_product(&doc),
        ProductDocument::Plain(product) => Ok(product),
    }
}

/// Normalizes a typed product document into a [`Product`].
///
/// # Errors
///
/// Returns [`CatalogError::MalformedDocument`] naming the first field that is
/// missing or carries the wrong tag, e.g. `images[2]` or `reviews[0].rating`.
pub fn normalize_product(doc: &TypedDocument) -> Result<Product, CatalogError> {
    let images = doc
        .array("images")?
        .iter()
        .enumerate()
        .map(|(i, image)| image.expect_str(&format!("images[{i}]")).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;

    let reviews = doc
        .array("reviews")?
        .iter()
        .enumerate()
        .map(|(i, review)| {
            let path = format!("reviews[{i}]");
            let fields = review.expect_map(&path)?;
            normalize_review(fields).map_err(|e| e.within(&path))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        id: doc.integer("id")?,
        title: doc.string("title")?.to_owned(),
        description: doc.string("description")?.to_owned(),
        price: doc.double("price")?,
        category: doc.string("category")?.to_owned(),
        stock: doc.integer("stock")?,
        rating: doc.double("rating")?,
        images,
        thumbnail: doc.string("thumbnail")?.to_owned(),
        reviews,
    })
}

fn normalize_review(fields: &TypedDocument) -> Result<Review, CatalogError> {
    Ok(Review {
        reviewer_name: fields.string("reviewerName")?.to_owned(),
        rating: fields.integer("rating")?,
        comment: fields.string("comment")?.to_owned(),
        date: fields.string("date")?.to_owned(),
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
