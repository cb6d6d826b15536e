use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// fixtures
// -----------------------------------------------------------------------

fn review_json(name: &str, rating: i64) -> Value {
    json!({
        "mapValue": {
            "fields": {
                "reviewerName": {"stringValue": name},
                "rating": {"integerValue": rating.to_string()},
                "comment": {"stringValue": "Very satisfied!"},
                "date": {"stringValue": "2024-05-23T08:56:21.618Z"}
            }
        }
    })
}

fn product_json() -> Value {
    json!({
        "id": {"integerValue": "1"},
        "title": {"stringValue": "Essence Mascara Lash Princess"},
        "description": {"stringValue": "A popular mascara."},
        "price": {"doubleValue": 19.99},
        "category": {"stringValue": "beauty"},
        "stock": {"integerValue": 5},
        "rating": {"doubleValue": 4.94},
        "images": {"arrayValue": {"values": [
            {"stringValue": "https://cdn.example.com/1.png"},
            {"stringValue": "https://cdn.example.com/2.png"}
        ]}},
        "thumbnail": {"stringValue": "https://cdn.example.com/thumb.png"},
        "reviews": {"arrayValue": {"values": [
            review_json("John Doe", 2),
            review_json("Nolan Gonzalez", 5)
        ]}}
    })
}

fn typed(value: Value) -> TypedDocument {
    TypedDocument::from_json(value).expect("fixture should be a valid typed document")
}

fn field_of(err: &CatalogError) -> &str {
    match err {
        CatalogError::MalformedDocument { field, .. } => field,
        other => panic!("expected MalformedDocument, got: {other:?}"),
    }
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn normalize_product_unwraps_scalars_exactly() {
    let product = normalize_product(&typed(product_json())).unwrap();
    assert_eq!(product.id, 1);
    assert_eq!(product.title, "Essence Mascara Lash Princess");
    assert_eq!(product.description, "A popular mascara.");
    assert!((product.price - 19.99).abs() < f64::EPSILON);
    assert_eq!(product.price.to_bits(), 19.99_f64.to_bits());
    assert_eq!(product.category, "beauty");
    assert_eq!(product.stock, 5);
    assert_eq!(product.rating.to_bits(), 4.94_f64.to_bits());
    assert_eq!(product.thumbnail, "https://cdn.example.com/thumb.png");
}

#[test]
fn normalize_product_keeps_image_order() {
    let product = normalize_product(&typed(product_json())).unwrap();
    assert_eq!(
        product.images,
        vec![
            "https://cdn.example.com/1.png".to_owned(),
            "https://cdn.example.com/2.png".to_owned()
        ]
    );
}

#[test]
fn normalize_product_extracts_reviews() {
    let product = normalize_product(&typed(product_json())).unwrap();
    assert_eq!(product.reviews.len(), 2);
    assert_eq!(product.reviews[0].reviewer_name, "John Doe");
    assert_eq!(product.reviews[0].rating, 2);
    assert_eq!(product.reviews[1].reviewer_name, "Nolan Gonzalez");
    assert_eq!(product.reviews[1].comment, "Very satisfied!");
    assert_eq!(product.reviews[1].date, "2024-05-23T08:56:21.618Z");
}

#[test]
fn normalize_product_accepts_empty_images() {
    let mut raw = product_json();
    raw["images"] = json!({"arrayValue": {"values": []}});
    let product = normalize_product(&typed(raw)).unwrap();
    assert!(product.images.is_empty());
    let card = nexty_core::ProductCard::new(product);
    assert!(!card.gallery().shows_controls());
    assert!(card.current_image().is_none());
}

#[test]
fn normalize_product_accepts_array_without_values_key() {
    let mut raw = product_json();
    raw["reviews"] = json!({"arrayValue": {}});
    let product = normalize_product(&typed(raw)).unwrap();
    assert!(product.reviews.is_empty());
}

#[test]
fn normalize_product_passes_out_of_range_values_through() {
    let mut raw = product_json();
    raw["price"] = json!({"doubleValue": -3.5});
    raw["rating"] = json!({"doubleValue": 9.0});
    let product = normalize_product(&typed(raw)).unwrap();
    assert!((product.price - -3.5).abs() < f64::EPSILON);
    assert!((product.rating - 9.0).abs() < f64::EPSILON);
}

#[test]
fn normalize_product_fails_on_missing_field() {
    let mut raw = product_json();
    raw.as_object_mut().unwrap().remove("thumbnail");
    let err = normalize_product(&typed(raw)).unwrap_err();
    assert_eq!(field_of(&err), "thumbnail");
}

#[test]
fn normalize_product_fails_on_wrong_tag() {
    let mut raw = product_json();
    raw["price"] = json!({"stringValue": "19.99"});
    let err = normalize_product(&typed(raw)).unwrap_err();
    assert_eq!(field_of(&err), "price");
}

#[test]
fn normalize_product_names_bad_image_index() {
    let mut raw = product_json();
    raw["images"] = json!({"arrayValue": {"values": [
        {"stringValue": "https://cdn.example.com/1.png"},
        {"integerValue": "7"}
    ]}});
    let err = normalize_product(&typed(raw)).unwrap_err();
    assert_eq!(field_of(&err), "images[1]");
}

#[test]
fn normalize_product_names_bad_review_field() {
    let mut raw = product_json();
    raw["reviews"] = json!({"arrayValue": {"values": [
        review_json("John Doe", 2),
        {"mapValue": {"fields": {
            "reviewerName": {"stringValue": "Ann"},
            "rating": {"doubleValue": 4.5},
            "comment": {"stringValue": "ok"},
            "date": {"stringValue": "2024-01-01"}
        }}}
    ]}});
    let err = normalize_product(&typed(raw)).unwrap_err();
    assert_eq!(field_of(&err), "reviews[1].rating");
}

#[test]
fn normalize_product_rejects_review_that_is_not_a_map() {
    let mut raw = product_json();
    raw["reviews"] = json!({"arrayValue": {"values": [{"stringValue": "great"}]}});
    let err = normalize_product(&typed(raw)).unwrap_err();
    assert_eq!(field_of(&err), "reviews[0]");
}

// -----------------------------------------------------------------------
// ProductDocument::from_value / normalize_document
// -----------------------------------------------------------------------

#[test]
fn from_value_detects_bare_typed_document() {
    let doc = ProductDocument::from_value(product_json()).unwrap();
    assert!(matches!(doc, ProductDocument::Typed(_)));
    assert_eq!(normalize_document(doc).unwrap().id, 1);
}

#[test]
fn from_value_unwraps_firestore_envelope() {
    let envelope = json!({
        "name": "projects/demo/databases/(default)/documents/products/abc",
        "fields": product_json(),
        "createTime": "2024-05-23T08:56:21.618Z",
        "updateTime": "2024-05-23T08:56:21.618Z"
    });
    let doc = ProductDocument::from_value(envelope).unwrap();
    assert_eq!(normalize_document(doc).unwrap().title, "Essence Mascara Lash Princess");
}

#[test]
fn from_value_accepts_plain_product() {
    let plain = json!({
        "id": 3,
        "title": "Powder Canister",
        "description": "Fine powder.",
        "price": 14.99,
        "category": "beauty",
        "stock": 59,
        "rating": 3.82,
        "images": ["https://cdn.example.com/p.png"],
        "thumbnail": "https://cdn.example.com/t.png",
        "reviews": []
    });
    let doc = ProductDocument::from_value(plain).unwrap();
    assert!(matches!(doc, ProductDocument::Plain(_)));
    let product = normalize_document(doc).unwrap();
    assert_eq!(product.stock, 59);
    assert_eq!(product.images.len(), 1);
}

#[test]
fn from_value_rejects_non_object() {
    let err = ProductDocument::from_value(json!("not a product")).unwrap_err();
    assert_eq!(field_of(&err), "<document>");
}

#[test]
fn from_value_rejects_object_of_neither_shape() {
    let err = ProductDocument::from_value(json!({"name": "orphan"})).unwrap_err();
    assert_eq!(field_of(&err), "<document>");
}
