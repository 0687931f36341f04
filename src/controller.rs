//! The page controller.
//!
//! One [`PageController`] exists per page. It owns the section list, the
//! index of the active navigation entry, and the in-flight scroll animation
//! whose presence is the "navigating" state. Every browser event maps to one
//! method:
//!
//! | event                     | method                                 |
//! |---------------------------|----------------------------------------|
//! | DOM ready                 | [`build`](PageController::build), then [`resize`](PageController::resize) |
//! | click on an entry link    | [`click_entry`](PageController::click_entry) |
//! | animation frame           | [`frame`](PageController::frame)       |
//! | window scroll             | [`scroll`](PageController::scroll)     |
//! | window resize, image load | [`resize`](PageController::resize)     |

use crate::config::NavConfig;
use crate::error::NavError;
use crate::layout::fill_height;
use crate::page::Page;
use crate::router::{fragment_id, scroll_target, ScrollAnimation};
use crate::toc::{build_toc, Section};
use crate::tracker::select_section;

pub struct PageController<P: Page> {
    page: P,
    config: NavConfig,
    sections: Vec<Section>,
    built: bool,
    active: Option<usize>,
    animation: Option<ScrollAnimation>,
}

impl<P: Page> PageController<P> {
    pub fn new(page: P, config: NavConfig) -> Self {
        Self {
            page,
            config,
            sections: Vec::new(),
            built: false,
            active: None,
            animation: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Index of the active navigation entry.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// True while a programmatic scroll is animating.
    pub fn is_navigating(&self) -> bool {
        self.animation.is_some()
    }

    /// Build the TOC and activate its first entry.
    ///
    /// Only the first call scans the page; later calls return the existing
    /// section count.
    pub fn build(&mut self) -> usize {
        if self.built {
            return self.sections.len();
        }
        self.built = true;
        self.sections = build_toc(&mut self.page, &self.config);
        if !self.sections.is_empty() {
            self.activate(0);
        }
        self.sections.len()
    }

    /// Scroll to the section behind the navigation entry at `index`.
    pub fn click_entry(&mut self, index: usize, now_ms: f64) -> Result<f64, NavError> {
        let href = self
            .sections
            .get(index)
            .map(Section::href)
            .ok_or(NavError::NoSuchEntry(index))?;
        self.navigate_to(&href, now_ms)
    }

    /// Start an animated scroll to the element `href` points at and make
    /// the matching entry active.
    ///
    /// Returns the target scroll offset. When the target element does not
    /// exist nothing changes and [`NavError::MissingTarget`] is returned.
    pub fn navigate_to(&mut self, href: &str, now_ms: f64) -> Result<f64, NavError> {
        let id = fragment_id(href)?;
        let offset = self
            .page
            .offset_of(id)
            .ok_or_else(|| NavError::MissingTarget {
                href: href.to_owned(),
                id: id.to_owned(),
            })?;

        let target = scroll_target(offset, self.config.header_clearance);
        let from = self.page.viewport().scroll_top;
        if self.animation.is_some() {
            log::debug!("[route] replacing in-flight animation from={from}");
        }
        self.animation = Some(ScrollAnimation::new(
            from,
            target,
            now_ms,
            self.config.scroll_duration_ms,
        ));

        if let Some(index) = self.sections.iter().position(|s| s.id == id) {
            self.activate(index);
        }
        log::debug!("[route] href={href} offset={offset} target={target}");
        Ok(target)
    }

    /// Advance the scroll animation to `now_ms`.
    ///
    /// Returns `true` while more frames are needed. The navigating state is
    /// cleared on the frame that reaches the target.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let frame = animation.sample(now_ms);
        self.page.set_scroll_top(frame.position);
        if frame.done {
            self.animation = None;
            log::debug!("[route] arrived target={}", animation.target());
        }
        !frame.done
    }

    /// Re-evaluate which section is current after a scroll.
    ///
    /// Suppressed while navigating and when the page has no sections.
    /// Returns the index of the selected section.
    pub fn scroll(&mut self) -> Option<usize> {
        if self.is_navigating() || self.sections.is_empty() {
            return None;
        }
        let viewport = self.page.viewport();
        let offsets: Vec<Option<f64>> = self
            .sections
            .iter()
            .map(|s| self.page.offset_of(&s.id))
            .collect();
        let selected = select_section(&offsets, &viewport)?;
        log::trace!(
            "[track] scroll_top={} line={} selected={}",
            viewport.scroll_top,
            viewport.reading_line(),
            selected
        );
        self.activate(selected);
        Some(selected)
    }

    /// Fit the section element to the viewport.
    ///
    /// Returns the content height applied, or `None` when the section was
    /// left at `height: auto` (or does not exist).
    pub fn resize(&mut self) -> Option<f64> {
        let Some(section) = self.page.measure_section() else {
            log::trace!("[layout] no section element");
            return None;
        };
        let viewport_height = self.page.viewport().height;
        let height = fill_height(&section, viewport_height, self.config.fill_buffer);
        if height.is_some() {
            self.page.set_section_height(height);
        }
        log::debug!(
            "[layout] viewport={} outer={} height={:?}",
            viewport_height,
            section.outer_height,
            height
        );
        height
    }

    fn activate(&mut self, index: usize) {
        if self.active == Some(index) {
            return;
        }
        if let Some(previous) = self.active {
            self.page.set_entry_active(previous, false);
        }
        self.page.set_entry_active(index, true);
        self.active = Some(index);
    }
}
