#![forbid(unsafe_code)]

//! Page geometry: section bounds, viewport, and visibility ratios.
//!
//! All values are document-relative CSS pixels as reported by
//! `offsetTop` / `offsetHeight`.

/// Vertical extent of a page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Whether `probe` lies in `[top, top + height)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, probe: f64) -> bool {
        probe >= self.top && probe < self.top + self.height
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Vertical extent of an observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            scroll_y: 0.0,
        }
    }
}

impl Viewport {
    /// Fraction of `element` inside the viewport after shrinking its bottom
    /// edge by `bottom_margin` pixels (the `rootMargin` bottom inset).
    ///
    /// Zero-height elements report `1.0` when their top edge is inside the
    /// adjusted viewport, `0.0` otherwise.
    #[must_use]
    pub fn visible_ratio(&self, element: ElementBox, bottom_margin: f64) -> f32 {
        let view_top = self.scroll_y;
        let view_bottom = (self.scroll_y + f64::from(self.height) - bottom_margin).max(view_top);
        if element.height <= 0.0 {
            let inside = element.top >= view_top && element.top < view_bottom;
            return if inside { 1.0 } else { 0.0 };
        }
        let top = element.top.max(view_top);
        let bottom = (element.top + element.height).min(view_bottom);
        let visible = (bottom - top).max(0.0);
        (visible / element.height).clamp(0.0, 1.0) as f32
    }
}
