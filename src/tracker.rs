//! Active-section selection for the scroll tracker.

use crate::page::Viewport;

/// Pick the section that is "current" for the given viewport.
///
/// `offsets` are the document offsets of the sections in reading order;
/// `None` marks a section whose element could not be located and never
/// matches. At the bottom of the document the last section always wins.
/// Otherwise the last section whose top lies strictly above the reading line
/// (mid-viewport) is selected; when none does, the first section is.
///
/// Returns `None` only for an empty section list.
pub fn select_section(offsets: &[Option<f64>], viewport: &Viewport) -> Option<usize> {
    if offsets.is_empty() {
        return None;
    }
    if viewport.at_bottom() {
        return Some(offsets.len() - 1);
    }

    let line = viewport.reading_line();
    let mut selected = None;
    // No early exit: offsets are not guaranteed monotonic.
    for (index, offset) in offsets.iter().enumerate() {
        if matches!(offset, Some(top) if *top < line) {
            selected = Some(index);
        }
    }
    Some(selected.unwrap_or(0))
}
