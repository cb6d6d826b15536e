//! Firestore-style typed documents.
//!
//! Every field of a document is boxed in a single-key wrapper naming its
//! type, e.g. `{"price": {"doubleValue": 19.99}}`. [`TypedValue`] models the
//! wrapper as an externally tagged enum, so a wrapper with no tag, an unknown
//! tag, or more than one tag fails to deserialize.
//!
//! ## Observed wire quirks
//!
//! - `integerValue` is an int64 and the Firestore REST API sends it as a
//!   decimal string (`"42"`). Plain JSON numbers are accepted as well.
//! - `arrayValue` omits `values` entirely for an empty array.
//! - `mapValue` omits `fields` entirely for an empty map.

use std::collections::BTreeMap;

use nexty_core::products::deserialize_int64;
use serde::Deserialize;

use crate::error::CatalogError;

/// One tagged value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypedValue {
    StringValue(String),
    IntegerValue(#[serde(deserialize_with = "deserialize_int64")] i64),
    DoubleValue(f64),
    BooleanValue(bool),
    TimestampValue(String),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<TypedValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: TypedDocument,
}

/// A mapping from field name to [`TypedValue`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TypedDocument {
    fields: BTreeMap<String, TypedValue>,
}

impl TypedValue {
    /// Wire name of this value's tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            TypedValue::StringValue(_) => "stringValue",
            TypedValue::IntegerValue(_) => "integerValue",
            TypedValue::DoubleValue(_) => "doubleValue",
            TypedValue::BooleanValue(_) => "booleanValue",
            TypedValue::TimestampValue(_) => "timestampValue",
            TypedValue::ArrayValue(_) => "arrayValue",
            TypedValue::MapValue(_) => "mapValue",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::StringValue(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::IntegerValue(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::DoubleValue(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::ArrayValue(a) => Some(&a.values),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&TypedDocument> {
        match self {
            TypedValue::MapValue(m) => Some(&m.fields),
            _ => None,
        }
    }

    /// String payload, or `MalformedDocument` naming `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] when the tag is not `stringValue`.
    pub fn expect_str(&self, path: &str) -> Result<&str, CatalogError> {
        self.as_str().ok_or_else(|| self.mismatch(path, "stringValue"))
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] when the tag is not `integerValue`.
    pub fn expect_i64(&self, path: &str) -> Result<i64, CatalogError> {
        self.as_i64().ok_or_else(|| self.mismatch(path, "integerValue"))
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] when the tag is not `doubleValue`.
    pub fn expect_f64(&self, path: &str) -> Result<f64, CatalogError> {
        self.as_f64().ok_or_else(|| self.mismatch(path, "doubleValue"))
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] when the tag is not `arrayValue`.
    pub fn expect_array(&self, path: &str) -> Result<&[TypedValue], CatalogError> {
        self.as_array().ok_or_else(|| self.mismatch(path, "arrayValue"))
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] when the tag is not `mapValue`.
    pub fn expect_map(&self, path: &str) -> Result<&TypedDocument, CatalogError> {
        self.as_map().ok_or_else(|| self.mismatch(path, "mapValue"))
    }

    fn mismatch(&self, path: &str, expected: &str) -> CatalogError {
        CatalogError::malformed(path, format!("expected {expected}, found {}", self.tag()))
    }
}

impl TypedDocument {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: TypedValue) {
        self.fields.insert(field.into(), value);
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] if `field` is absent.
    pub fn field(&self, field: &str) -> Result<&TypedValue, CatalogError> {
        self.get(field)
            .ok_or_else(|| CatalogError::malformed(field, "field is missing"))
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] if `field` is absent or not a `stringValue`.
    pub fn string(&self, field: &str) -> Result<&str, CatalogError> {
        self.field(field)?.expect_str(field)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] if `field` is absent or not an `integerValue`.
    pub fn integer(&self, field: &str) -> Result<i64, CatalogError> {
        self.field(field)?.expect_i64(field)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] if `field` is absent or not a `doubleValue`.
    pub fn double(&self, field: &str) -> Result<f64, CatalogError> {
        self.field(field)?.expect_f64(field)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] if `field` is absent or not an `arrayValue`.
    pub fn array(&self, field: &str) -> Result<&[TypedValue], CatalogError> {
        self.field(field)?.expect_array(field)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] if `field` is absent or not a `mapValue`.
    pub fn map(&self, field: &str) -> Result<&TypedDocument, CatalogError> {
        self.field(field)?.expect_map(field)
    }

    /// Parses a JSON object of tagged wrappers field by field, so a bad
    /// wrapper is reported under its own field name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedDocument`] if `value` is not an
    /// object or any field is not a valid single-tag wrapper.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CatalogError> {
        let object = match value {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(CatalogError::malformed(
                    "<document>",
                    format!("expected a JSON object, found {}", json_kind(&other)),
                ))
            }
        };

        let mut document = TypedDocument::default();
        for (name, raw) in object {
            let typed = serde_json::from_value::<TypedValue>(raw)
                .map_err(|e| CatalogError::malformed(name.as_str(), e.to_string()))?;
            document.fields.insert(name, typed);
        }
        Ok(document)
    }
}

impl FromIterator<(String, TypedValue)> for TypedDocument {
    fn from_iter<I: IntoIterator<Item = (String, TypedValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_accepts_number_and_string() {
        let from_number: TypedValue = serde_json::from_value(json!({"integerValue": 42})).unwrap();
        let from_string: TypedValue =
            serde_json::from_value(json!({"integerValue": "42"})).unwrap();
        assert_eq!(from_number, TypedValue::IntegerValue(42));
        assert_eq!(from_string, TypedValue::IntegerValue(42));
    }

    #[test]
    fn integer_rejects_non_numeric_string() {
        let result = serde_json::from_value::<TypedValue>(json!({"integerValue": "forty"}));
        assert!(result.is_err());
    }

    #[test]
    fn double_accepts_whole_number() {
        let value: TypedValue = serde_json::from_value(json!({"doubleValue": 20})).unwrap();
        assert_eq!(value.as_f64(), Some(20.0));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let result = serde_json::from_value::<TypedValue>(json!({"bytesValue": "AAEC"}));
        assert!(result.is_err());
    }

    #[test]
    fn wrapper_with_two_tags_is_rejected() {
        let result = serde_json::from_value::<TypedValue>(
            json!({"stringValue": "a", "integerValue": "1"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_wrapper_is_rejected() {
        assert!(serde_json::from_value::<TypedValue>(json!({})).is_err());
    }

    #[test]
    fn empty_array_and_map_omit_their_payload() {
        let array: TypedValue = serde_json::from_value(json!({"arrayValue": {}})).unwrap();
        let map: TypedValue = serde_json::from_value(json!({"mapValue": {}})).unwrap();
        assert_eq!(array.as_array().map(<[TypedValue]>::len), Some(0));
        assert!(map.as_map().is_some_and(TypedDocument::is_empty));
    }

    #[test]
    fn accessor_reports_missing_field() {
        let doc = TypedDocument::default();
        let err = doc.string("title").unwrap_err();
        assert!(
            matches!(err, CatalogError::MalformedDocument { ref field, ref reason }
                if field == "title" && reason == "field is missing"),
            "got: {err:?}"
        );
    }

    #[test]
    fn accessor_reports_tag_mismatch() {
        let doc: TypedDocument =
            [("price".to_owned(), TypedValue::StringValue("19.99".to_owned()))]
                .into_iter()
                .collect();
        let err = doc.double("price").unwrap_err();
        assert!(
            matches!(err, CatalogError::MalformedDocument { ref reason, .. }
                if reason == "expected doubleValue, found stringValue"),
            "got: {err:?}"
        );
    }

    #[test]
    fn from_json_names_the_offending_field() {
        let err = TypedDocument::from_json(json!({
            "title": {"stringValue": "ok"},
            "price": 19.99
        }))
        .unwrap_err();
        assert!(
            matches!(err, CatalogError::MalformedDocument { ref field, .. } if field == "price"),
            "got: {err:?}"
        );
    }

    #[test]
    fn from_json_rejects_non_object() {
        let err = TypedDocument::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedDocument { .. }));
    }

    #[test]
    fn nested_map_round_trips_through_accessors() {
        let doc = TypedDocument::from_json(json!({
            "meta": {"mapValue": {"fields": {"barcode": {"stringValue": "123"}}}}
        }))
        .unwrap();
        assert_eq!(doc.map("meta").unwrap().string("barcode").unwrap(), "123");
    }
}
