//! Per-card image gallery navigation.
//!
//! The index is cyclic in `[0, len)`. With `len == 0` there is no current
//! image and both steps are no-ops; controls are only shown for `len > 1`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryState {
    index: usize,
    len: usize,
}

impl GalleryState {
    /// A gallery over `len` images, starting at the first one.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Starts at `index`, reduced modulo `len`.
    #[must_use]
    pub fn at(len: usize, index: usize) -> Self {
        let index = if len == 0 { 0 } else { index % len };
        Self { index, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Previous/next controls are rendered only when there is something to
    /// step through.
    #[must_use]
    pub fn shows_controls(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Moves `steps` images forward, or back when negative, wrapping at both
    /// ends. Costs the same for any step size.
    pub fn step(&mut self, steps: i64) {
        if self.len == 0 {
            return;
        }
        let len = i64::try_from(self.len).unwrap_or(i64::MAX);
        let offset = usize::try_from(steps.rem_euclid(len)).unwrap_or(0);
        self.index = (self.index + offset) % self.len;
    }

    /// The image at the current index, or `None` for an empty gallery.
    #[must_use]
    pub fn current<'a>(&self, images: &'a [String]) -> Option<&'a str> {
        images.get(self.index).map(String::as_str)
    }
}
