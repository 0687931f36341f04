//! In-memory [`Page`] implementation.
//!
//! `MemoryPage` models just enough of a laid-out document to drive a
//! [`crate::PageController`] without a browser: headings with fixed
//! offsets, an optional TOC list, a window with a scroll position, and an
//! optional section box. It records every mutation so callers can inspect
//! the result, and can render its TOC list back to HTML.

use crate::page::{Heading, NavEntry, Page, SectionBox, Viewport};
use crate::toc::entries_html;

/// An element with a document offset; `heading` is `None` for plain
/// elements.
#[derive(Debug, Clone)]
struct Node {
    heading: Option<Heading>,
    id: Option<String>,
    offset: f64,
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    /// Headings and plain elements, in document order.
    nodes: Vec<Node>,
    /// `None` when the page has no TOC list.
    entries: Option<Vec<NavEntry>>,
    active: Vec<bool>,
    active_toggles: usize,
    scroll_top: f64,
    viewport_height: f64,
    document_height: f64,
    section: Option<SectionBox>,
    section_height: Option<f64>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// An empty page with a TOC list, an 800px viewport and a 2000px
    /// document.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            entries: Some(Vec::new()),
            active: Vec::new(),
            active_toggles: 0,
            scroll_top: 0.0,
            viewport_height: 800.0,
            document_height: 2000.0,
            section: None,
            section_height: None,
        }
    }

    // --- builder ---

    /// Append a heading at the given document offset.
    pub fn heading(mut self, level: u8, text: &str, offset: f64) -> Self {
        self.nodes.push(Node {
            heading: Some(Heading {
                level,
                text: text.to_owned(),
            }),
            id: None,
            offset,
        });
        self
    }

    /// Append a non-heading element with an id.
    pub fn element(mut self, id: &str, offset: f64) -> Self {
        self.nodes.push(Node {
            heading: None,
            id: Some(id.to_owned()),
            offset,
        });
        self
    }

    fn heading_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.heading.is_some())
    }

    /// Remove the TOC list; appended entries are discarded.
    pub fn without_toc_list(mut self) -> Self {
        self.entries = None;
        self
    }

    pub fn window(mut self, viewport_height: f64, document_height: f64) -> Self {
        self.viewport_height = viewport_height;
        self.document_height = document_height;
        self
    }

    /// Give the page a section element with the given natural metrics.
    pub fn section(mut self, outer_height: f64, content_height: f64) -> Self {
        self.section = Some(SectionBox {
            outer_height,
            content_height,
        });
        self
    }

    // --- host events ---

    /// Scroll the window, as a user would.
    pub fn scroll_to(&mut self, top: f64) {
        self.scroll_top = top;
    }

    pub fn resize_window(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    // --- inspection ---

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Ids assigned to the headings, in document order.
    pub fn heading_ids(&self) -> Vec<Option<&str>> {
        self.heading_nodes().map(|n| n.id.as_deref()).collect()
    }

    /// Entries in the TOC list; empty when the page has no list.
    pub fn entries(&self) -> &[NavEntry] {
        self.entries.as_deref().unwrap_or(&[])
    }

    /// Indices of entries currently carrying the active class.
    pub fn active_entries(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
            .collect()
    }

    /// Number of add/remove operations on the active class so far.
    pub fn active_toggles(&self) -> usize {
        self.active_toggles
    }

    /// Explicit section height, `None` when `auto`.
    pub fn section_height(&self) -> Option<f64> {
        self.section_height
    }

    /// The TOC list's inner HTML.
    pub fn toc_html(&self, active_class: &str) -> String {
        let active = self.active.iter().position(|on| *on);
        entries_html(self.entries(), active, active_class)
    }
}

impl Page for MemoryPage {
    fn headings(&self) -> Vec<Heading> {
        self.heading_nodes().filter_map(|n| n.heading.clone()).collect()
    }

    fn set_heading_id(&mut self, index: usize, id: &str) {
        let node = self
            .nodes
            .iter_mut()
            .filter(|n| n.heading.is_some())
            .nth(index);
        if let Some(node) = node {
            node.id = Some(id.to_owned());
        }
    }

    fn append_entry(&mut self, entry: &NavEntry) {
        if let Some(entries) = self.entries.as_mut() {
            entries.push(entry.clone());
            self.active.push(false);
        }
    }

    fn set_entry_active(&mut self, index: usize, active: bool) {
        if let Some(flag) = self.active.get_mut(index) {
            *flag = active;
            self.active_toggles += 1;
        }
    }

    fn offset_of(&self, id: &str) -> Option<f64> {
        // First match in document order, as `getElementById` does.
        self.nodes
            .iter()
            .find(|n| n.id.as_deref() == Some(id))
            .map(|n| n.offset)
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.scroll_top,
            height: self.viewport_height,
            document_height: self.document_height,
        }
    }

    fn set_scroll_top(&mut self, top: f64) {
        let max = (self.document_height - self.viewport_height).max(0.0);
        self.scroll_top = top.clamp(0.0, max);
    }

    fn measure_section(&mut self) -> Option<SectionBox> {
        let section = self.section?;
        self.section_height = None;
        Some(section)
    }

    fn set_section_height(&mut self, height: Option<f64>) {
        if self.section.is_some() {
            self.section_height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped_to_document() {
        let mut page = MemoryPage::new().window(800.0, 2000.0);
        page.set_scroll_top(5000.0);
        assert_eq!(page.scroll_top(), 1200.0);
        page.set_scroll_top(-10.0);
        assert_eq!(page.scroll_top(), 0.0);
    }

    #[test]
    fn entries_are_dropped_without_toc_list() {
        let mut page = MemoryPage::new().without_toc_list();
        page.append_entry(&NavEntry {
            class: "tag-h1".into(),
            href: "#a".into(),
            text: "A".into(),
        });
        assert!(page.entries().is_empty());
        page.set_entry_active(0, true);
        assert!(page.active_entries().is_empty());
    }

    #[test]
    fn offset_lookup_covers_plain_elements() {
        let page = MemoryPage::new().element("footer", 1900.0);
        assert_eq!(page.offset_of("footer"), Some(1900.0));
        assert_eq!(page.offset_of("missing"), None);
    }

    #[test]
    fn id_lookup_returns_first_element_in_document_order() {
        let mut page = MemoryPage::new()
            .element("content", 0.0)
            .heading(1, "Content", 500.0);
        page.set_heading_id(0, "content");
        assert_eq!(page.heading_ids(), vec![Some("content")]);
        assert_eq!(
            page.offset_of("content"),
            Some(0.0),
            "the earlier container must shadow the heading"
        );
    }

    #[test]
    fn heading_indices_skip_plain_elements() {
        let mut page = MemoryPage::new()
            .heading(1, "Intro", 0.0)
            .element("banner", 100.0)
            .heading(2, "Usage", 900.0);
        page.set_heading_id(1, "usage");
        assert_eq!(page.heading_ids(), vec![None, Some("usage")]);
        assert_eq!(page.offset_of("usage"), Some(900.0));
    }
}
