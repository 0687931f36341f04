//! Table-of-contents construction.
//!
//! Scans the page's headings in document order, gives each one an anchor id,
//! and appends one navigation entry per heading to the TOC list.

use crate::config::NavConfig;
use crate::page::{NavEntry, Page};
use crate::slug::{slugify, SlugRegistry};

/// A heading that has been indexed into the TOC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading level (1–6).
    pub level: u8,
    /// Plain-text content of the heading.
    pub text: String,
    /// Anchor id assigned to the heading element, unique within the page.
    pub id: String,
}

impl Section {
    /// In-page link to this section.
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }

    fn entry(&self, config: &NavConfig) -> NavEntry {
        NavEntry {
            class: config.entry_class(self.level),
            href: self.href(),
            text: self.text.clone(),
        }
    }
}

/// Index every heading on `page` and append its navigation entry.
///
/// The section at position `i` of the returned list corresponds to the entry
/// appended `i`-th. Marking the first entry active is left to the caller.
pub fn build_toc<P: Page>(page: &mut P, config: &NavConfig) -> Vec<Section> {
    let mut registry = SlugRegistry::new();
    let mut sections = Vec::new();

    for (index, heading) in page.headings().into_iter().enumerate() {
        let id = registry.claim(&slugify(&heading.text));
        page.set_heading_id(index, &id);

        let section = Section {
            level: heading.level,
            text: heading.text,
            id,
        };
        page.append_entry(&section.entry(config));
        sections.push(section);
    }

    log::info!("[toc] sections={}", sections.len());
    sections
}

// ---------------------------------------------------------------------------
// HTML rendering
// ---------------------------------------------------------------------------

/// Minimal HTML entity escaping for text content and attribute values.
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render navigation entries as the `<li>` items of a TOC list.
///
/// `active` is the index of the entry carrying `active_class`. Returns an
/// empty string for an empty entry list.
pub fn entries_html(entries: &[NavEntry], active: Option<usize>, active_class: &str) -> String {
    let mut html = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let class = if active == Some(index) {
            format!("{} {}", entry.class, active_class)
        } else {
            entry.class.clone()
        };
        html.push_str(&format!(
            "<li class=\"{}\"><a href=\"{}\">{}</a></li>\n",
            html_escape(&class),
            html_escape(&entry.href),
            html_escape(&entry.text),
        ));
    }
    html
}
