//! The document seam.
//!
//! [`Page`] is everything the controller needs from a rendered document: the
//! headings to index, a list to append navigation entries to, element offsets,
//! the viewport, and the box of the section element. The browser binding
//! implements it over `web-sys`; [`crate::memory::MemoryPage`] implements it
//! in memory.
//!
//! All lengths are CSS pixels measured from the top of the document.

/// A heading element as found in the content container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1–6).
    pub level: u8,
    /// Plain-text content of the heading.
    pub text: String,
}

/// A navigation entry to append to the TOC list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Class attribute of the list item (`tag-h1`, `tag-h2`).
    pub class: String,
    /// Link target, always `#<id>`.
    pub href: String,
    /// Link text: the heading's display text.
    pub text: String,
}

/// Scroll state of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// Height of the visible area.
    pub height: f64,
    /// Full scrollable height of the document.
    pub document_height: f64,
}

impl Viewport {
    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        self.document_height - self.height
    }

    /// True when the viewport is scrolled to the end of the document.
    ///
    /// Overscroll past the end, and documents shorter than the viewport, count
    /// as being at the bottom.
    pub fn at_bottom(&self) -> bool {
        self.scroll_top >= self.max_scroll()
    }

    /// Mid-viewport line used to decide the current section.
    pub fn reading_line(&self) -> f64 {
        self.scroll_top + self.height / 2.0
    }
}

/// Box metrics of the section element, measured with `height: auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBox {
    /// Height including padding, border and margins.
    pub outer_height: f64,
    /// Height of the content box alone.
    pub content_height: f64,
}

impl SectionBox {
    /// Everything around the content box: padding, border and margins.
    pub fn chrome(&self) -> f64 {
        self.outer_height - self.content_height
    }
}

/// A rendered document the controller can read and mutate.
///
/// Heading indices refer to the order returned by [`Page::headings`]; entry
/// indices refer to the order entries were appended.
pub trait Page {
    /// Headings of the configured levels under the content container, in
    /// document order.
    fn headings(&self) -> Vec<Heading>;

    /// Set the `id` attribute of the heading at `index`.
    fn set_heading_id(&mut self, index: usize, id: &str);

    /// Append an entry to the TOC list. A page without a TOC list ignores
    /// the call.
    fn append_entry(&mut self, entry: &NavEntry);

    /// Add or remove the active class on the entry at `index`.
    fn set_entry_active(&mut self, index: usize, active: bool);

    /// Document offset of the top edge of the element with the given id.
    fn offset_of(&self, id: &str) -> Option<f64>;

    fn viewport(&self) -> Viewport;

    fn set_scroll_top(&mut self, top: f64);

    /// Reset the section element to `height: auto` and measure it. `None`
    /// when the page has no section element.
    fn measure_section(&mut self) -> Option<SectionBox>;

    /// Set the section's content height, or restore `auto` with `None`.
    fn set_section_height(&mut self, height: Option<f64>);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_top: f64, height: f64, document_height: f64) -> Viewport {
        Viewport {
            scroll_top,
            height,
            document_height,
        }
    }

    #[test]
    fn bottom_is_exact_max_scroll() {
        assert!(viewport(1200.0, 800.0, 2000.0).at_bottom());
        assert!(!viewport(1199.0, 800.0, 2000.0).at_bottom());
    }

    #[test]
    fn short_document_is_always_at_bottom() {
        assert!(viewport(0.0, 800.0, 600.0).at_bottom());
    }

    #[test]
    fn reading_line_is_mid_viewport() {
        assert_eq!(viewport(100.0, 1000.0, 5000.0).reading_line(), 600.0);
    }
}
