use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog product in its flat, normalized form.
///
/// Produced either by normalizing a typed document or by deserializing a
/// plain product object. `price` and `rating` are carried as received; no
/// range validation is applied at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "deserialize_int64")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_int64")]
    pub stock: i64,
    /// Average rating, nominally in `[0, 5]`.
    #[serde(default)]
    pub rating: f64,
    /// Gallery image URLs in display order. May be empty.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Storefront detail route for this product.
    #[must_use]
    pub fn detail_href(&self) -> String {
        format!("/api/products/{}", self.id)
    }

    /// Storefront add-to-cart route for this product.
    #[must_use]
    pub fn cart_href(&self) -> String {
        format!("/cart/add/{}", self.id)
    }

    /// Returns `true` when the product has at least one unit in stock.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub reviewer_name: String,
    pub rating: i64,
    pub comment: String,
    /// Review date exactly as the source sent it.
    pub date: String,
}

impl Review {
    /// Best-effort calendar date of the review.
    ///
    /// Accepts RFC 3339 timestamps (`2024-05-23T08:56:21.618Z`) and plain
    /// `YYYY-MM-DD` dates; anything else yields `None`.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }
}

/// Accepts an int64 either as a JSON number or as a decimal string.
///
/// Int64 fields arrive as strings from Firestore-style sources, so both the
/// plain and the typed product shapes read ids through this.
///
/// # Errors
///
/// Returns a deserialization error for anything other than an integer
/// number or a string holding one.
pub fn deserialize_int64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64Repr {
        Number(i64),
        Text(String),
    }

    match Int64Repr::deserialize(deserializer)? {
        Int64Repr::Number(n) => Ok(n),
        Int64Repr::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid integer \"{s}\": {e}"))),
    }
}
