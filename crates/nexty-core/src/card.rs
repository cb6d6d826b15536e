//! Presentation model for a single product card.

use crate::gallery::GalleryState;
use crate::products::Product;

/// Number of stars in the rating row.
pub const STAR_COUNT: usize = 5;

/// A product plus the per-card view state (currently just the gallery).
///
/// Each card owns its gallery; building a new card starts it at image 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    product: Product,
    gallery: GalleryState,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: Product) -> Self {
        let gallery = GalleryState::new(product.images.len());
        Self { product, gallery }
    }

    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn next_image(&mut self) {
        self.gallery.next();
    }

    pub fn previous_image(&mut self) {
        self.gallery.previous();
    }

    /// Steps the gallery by `steps` images; negative steps go back.
    pub fn step_images(&mut self, steps: i64) {
        self.gallery.step(steps);
    }

    /// URL of the image currently shown, if the product has any images.
    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.gallery.current(&self.product.images)
    }

    #[must_use]
    pub fn image_alt(&self) -> String {
        format!("Image of {}", self.product.title)
    }

    /// Filled state of each star: star `i` (0-based) is filled when
    /// `rating >= i + 1`.
    #[must_use]
    pub fn stars(&self) -> [bool; STAR_COUNT] {
        let mut stars = [false; STAR_COUNT];
        for (i, star) in stars.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let threshold = (i + 1) as f64;
            *star = self.product.rating >= threshold;
        }
        stars
    }

    /// Price with a dollar sign and two decimals, e.g. `$19.99`.
    #[must_use]
    pub fn formatted_price(&self) -> String {
        format_price(self.product.price)
    }

    #[must_use]
    pub fn stock_label(&self) -> String {
        format!("Stock: {} available", self.product.stock)
    }

    #[must_use]
    pub fn category_label(&self) -> String {
        format!("Category: {}", self.product.category)
    }
}

#[must_use]
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}
