//! Section height fitting.

use crate::page::SectionBox;

/// Content height that makes a short section fill the viewport.
///
/// Returns `None` (leave `height: auto`) when the section's outer height is
/// already at least the viewport height. Otherwise the section is stretched
/// to `viewport_height - chrome - buffer`, where chrome is everything outside
/// the content box. The result is never negative.
pub fn fill_height(section: &SectionBox, viewport_height: f64, buffer: f64) -> Option<f64> {
    if section.outer_height >= viewport_height {
        return None;
    }
    Some((viewport_height - section.chrome() - buffer).max(0.0))
}
