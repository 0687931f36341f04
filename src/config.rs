//! Page selectors and layout constants.
//!
//! Every field has a default matching the stock documentation theme, so an
//! empty JSON object (`{}`) is a valid configuration.

use serde::Deserialize;

use crate::error::NavError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NavConfig {
    /// Container whose headings become sections.
    pub content_selector: String,
    /// Heading levels collected into the TOC.
    pub heading_levels: Vec<u8>,
    /// List that receives the generated navigation entries.
    pub toc_list_selector: String,
    /// Element stretched by the layout sizer.
    pub section_selector: String,
    /// Class marking the active navigation entry.
    pub active_class: String,
    /// Entry class prefix; the heading level is appended (`tag-h1`).
    pub entry_class_prefix: String,
    /// Space kept above a section after a scroll-to (fixed header height).
    pub header_clearance: f64,
    pub scroll_duration_ms: f64,
    /// Slack subtracted from the viewport when stretching the section.
    pub fill_buffer: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            content_selector: "#content".to_owned(),
            heading_levels: vec![1, 2],
            toc_list_selector: "nav#toc ul".to_owned(),
            section_selector: "section".to_owned(),
            active_class: "active".to_owned(),
            entry_class_prefix: "tag-h".to_owned(),
            header_clearance: 116.0,
            scroll_duration_ms: 600.0,
            fill_buffer: 20.0,
        }
    }
}

impl NavConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, NavError> {
        let config: NavConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        if let Some(level) = self.heading_levels.iter().find(|l| !(1..=6).contains(*l)) {
            return Err(NavError::Config(format!(
                "heading level {level} is outside 1..=6"
            )));
        }
        if !self.scroll_duration_ms.is_finite() || self.scroll_duration_ms < 0.0 {
            return Err(NavError::Config(format!(
                "scrollDurationMs must be a non-negative number, got {}",
                self.scroll_duration_ms
            )));
        }
        for (name, value) in [
            ("headerClearance", self.header_clearance),
            ("fillBuffer", self.fill_buffer),
        ] {
            if !value.is_finite() {
                return Err(NavError::Config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    /// CSS selector matching every collected heading inside the content
    /// container, e.g. `#content h1, #content h2`.
    pub fn heading_selector(&self) -> String {
        self.heading_levels
            .iter()
            .map(|level| format!("{} h{}", self.content_selector, level))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Class attribute for an entry of the given heading level.
    pub fn entry_class(&self, level: u8) -> String {
        format!("{}{}", self.entry_class_prefix, level)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
