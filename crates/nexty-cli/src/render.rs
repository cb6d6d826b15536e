//! Plain-text and JSON rendering of the listing page.

use std::fmt::Write as _;

use nexty_catalog::ListingState;
use nexty_core::ProductCard;
use serde_json::{json, Value};

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// Renders one product card. The gallery shows its current image, with
/// `<` / `>` hints only when there is more than one image to step through.
pub(crate) fn render_card(card: &ProductCard) -> String {
    let product = card.product();
    let mut out = String::new();

    let _ = writeln!(out, "┌ {}", product.title);
    match card.current_image() {
        Some(url) if card.gallery().shows_controls() => {
            let _ = writeln!(
                out,
                "│ < [{}/{}] {url} >",
                card.gallery().index() + 1,
                card.gallery().len()
            );
        }
        Some(url) => {
            let _ = writeln!(out, "│ {url}");
        }
        None => {
            let _ = writeln!(out, "│ (no image)");
        }
    }
    if !product.description.is_empty() {
        let _ = writeln!(out, "│ {}", product.description);
    }

    let stars: String = card
        .stars()
        .iter()
        .map(|&filled| if filled { FILLED_STAR } else { EMPTY_STAR })
        .collect();
    let _ = writeln!(out, "│ {stars} {}", product.rating);
    let _ = writeln!(out, "│ {}", card.category_label());
    let _ = writeln!(out, "│ {}", card.stock_label());
    let _ = writeln!(out, "│ {}", card.formatted_price());
    let _ = writeln!(
        out,
        "└ details: {}  add to cart: {}",
        product.detail_href(),
        product.cart_href()
    );
    out
}

/// Renders the whole listing: filters, cards or the empty-state message,
/// and the pagination bar.
pub(crate) fn render_listing(state: &ListingState, gallery_step: i64) -> String {
    let mut out = String::new();
    let query = &state.query;

    let categories = if state.categories.is_empty() {
        "(none)".to_owned()
    } else {
        state.categories.join(", ")
    };
    let _ = writeln!(out, "Categories: {categories}");
    let _ = writeln!(
        out,
        "Search: \"{}\"  Sort: \"{}\"  Category: \"{}\"",
        query.search(),
        query.sort(),
        query.category()
    );
    let _ = writeln!(out);

    if let Some(message) = state.status.message() {
        let _ = writeln!(out, "{message}");
    } else {
        for mut card in state.cards() {
            card.step_images(gallery_step);
            out.push_str(&render_card(&card));
            let _ = writeln!(out);
        }
    }

    let controls = state.pagination();
    let previous = if controls.previous_enabled {
        format!(
            "{} ({})",
            controls.previous_label,
            query.previous_page().to_href()
        )
    } else {
        format!("[{}]", controls.previous_label)
    };
    let next = if controls.next_enabled {
        format!("{} ({})", controls.next_label, query.next_page().to_href())
    } else {
        format!("[{}]", controls.next_label)
    };
    let _ = writeln!(out, "{previous}  Page {}  {next}", controls.page);
    let _ = writeln!(out, "Reset All Filters ({})", query.reset().to_href());
    out
}

/// JSON view of the listing, for scripting.
pub(crate) fn listing_json(state: &ListingState) -> Value {
    let controls = state.pagination();
    json!({
        "query": state.query.to_href(),
        "categories": state.categories,
        "status": state.status.as_str(),
        "message": state.status.message(),
        "products": state.products,
        "skippedDocuments": state.skipped_documents,
        "pagination": {
            "page": controls.page,
            "previousEnabled": controls.previous_enabled,
            "nextEnabled": controls.next_enabled,
        },
    })
}

#[cfg(test)]
mod tests {
    use nexty_catalog::ListingStatus;
    use nexty_core::{ListingQuery, Product};

    use super::*;

    fn product(id: i64, images: usize) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            description: "Nice.".to_owned(),
            price: 19.99,
            category: "beauty".to_owned(),
            stock: 4,
            rating: 3.2,
            images: (0..images)
                .map(|i| format!("https://cdn.example.com/{id}/{i}.png"))
                .collect(),
            thumbnail: String::new(),
            reviews: Vec::new(),
        }
    }

    fn state(products: Vec<Product>, page: u32, status: ListingStatus) -> ListingState {
        ListingState {
            query: ListingQuery::new("", "", "", page),
            products,
            categories: vec!["beauty".to_owned()],
            loading: false,
            status,
            skipped_documents: 0,
        }
    }

    #[test]
    fn card_shows_stars_price_and_links() {
        let text = render_card(&ProductCard::new(product(7, 1)));
        assert!(text.contains("★★★☆☆ 3.2"), "{text}");
        assert!(text.contains("$19.99"), "{text}");
        assert!(text.contains("Stock: 4 available"), "{text}");
        assert!(text.contains("/api/products/7"), "{text}");
        assert!(text.contains("/cart/add/7"), "{text}");
        assert!(!text.contains(" >"), "single image has no controls: {text}");
    }

    #[test]
    fn card_with_several_images_shows_controls() {
        let text = render_card(&ProductCard::new(product(1, 3)));
        assert!(text.contains("< [1/3] https://cdn.example.com/1/0.png >"), "{text}");
    }

    #[test]
    fn card_without_images_renders_placeholder() {
        let text = render_card(&ProductCard::new(product(1, 0)));
        assert!(text.contains("(no image)"), "{text}");
    }

    #[test]
    fn gallery_step_wraps_backwards() {
        let mut card = ProductCard::new(product(1, 3));
        card.step_images(-1);
        assert_eq!(card.current_image(), Some("https://cdn.example.com/1/2.png"));
        card.step_images(4);
        assert_eq!(card.current_image(), Some("https://cdn.example.com/1/0.png"));
    }

    #[test]
    fn huge_gallery_step_renders_promptly() {
        let products = vec![product(1, 3), product(2, 0)];
        let text = render_listing(&state(products, 1, ListingStatus::Loaded), i64::MAX);
        assert!(text.contains("< [2/3] https://cdn.example.com/1/1.png >"), "{text}");
        assert!(text.contains("(no image)"), "{text}");
    }

    #[test]
    fn empty_listing_shows_message_and_disabled_buttons() {
        let text = render_listing(&state(Vec::new(), 1, ListingStatus::Unavailable), 0);
        assert!(text.contains("No products available."), "{text}");
        assert!(text.contains("[Previous]  Page 1  [Next]"), "{text}");
        assert!(text.contains("Reset All Filters (/)"), "{text}");
    }

    #[test]
    fn full_page_links_to_neighbours() {
        let products = (1..=20).map(|id| product(id, 1)).collect();
        let text = render_listing(&state(products, 2, ListingStatus::Loaded), 0);
        assert!(text.contains("Previous (/)  Page 2  Next (/?page=3)"), "{text}");
    }

    #[test]
    fn json_view_reports_status_and_pagination() {
        let value = listing_json(&state(vec![product(1, 1)], 1, ListingStatus::Loaded));
        assert_eq!(value["status"], "loaded");
        let unavailable = listing_json(&state(Vec::new(), 1, ListingStatus::Unavailable));
        assert_eq!(unavailable["status"], "unavailable");
        assert_eq!(unavailable["message"], "No products available.");
        assert_eq!(value["products"][0]["id"], 1);
        assert_eq!(value["pagination"]["nextEnabled"], false);
        assert!(value["message"].is_null());
    }
}
