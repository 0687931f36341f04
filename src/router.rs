//! Animated scrolling to a section.
//!
//! A [`ScrollAnimation`] is a pure function of time: the host calls
//! [`ScrollAnimation::sample`] once per animation frame and writes the
//! returned offset to the window.

use crate::error::NavError;

/// Cubic ease-in-out over `t ∈ [0, 1]`. Inputs outside the range are clamped.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Scroll position that puts a section at `offset` just below the fixed
/// header.
pub fn scroll_target(offset: f64, header_clearance: f64) -> f64 {
    offset - header_clearance
}

/// Element id referenced by an in-page link (`#intro` → `intro`).
///
/// A full URL with a fragment (`page.html#intro`) is accepted too; anything
/// without a `#` is not an in-page link.
pub fn fragment_id(href: &str) -> Result<&str, NavError> {
    match href.split_once('#') {
        Some((_, id)) => Ok(id),
        None => Err(NavError::NotAFragment(href.to_owned())),
    }
}

/// A time-based scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

/// One frame of a [`ScrollAnimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Scroll offset to apply.
    pub position: f64,
    /// True on the final frame; `position` is then exactly the target.
    pub done: bool,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Position at timestamp `now_ms`.
    pub fn sample(&self, now_ms: f64) -> Frame {
        let elapsed = now_ms - self.start_ms;
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return Frame {
                position: self.to,
                done: true,
            };
        }
        let progress = ease_in_out_cubic(elapsed / self.duration_ms);
        Frame {
            position: self.from + (self.to - self.from) * progress,
            done: false,
        }
    }
}
