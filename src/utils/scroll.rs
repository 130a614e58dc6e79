//! Scroll math for the transcript pane.
//!
//! The pane renders wrapped paragraphs, so scroll bounds are computed from an
//! estimate of how many terminal rows the display lines occupy at the current
//! width.

use ratatui::text::Line;
use unicode_width::UnicodeWidthStr;

/// Rows occupied by one logical line when wrapped at `width` columns.
fn rows_for_line(line: &Line, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let line_width: usize = line
        .spans
        .iter()
        .map(|span| span.content.as_ref().width())
        .sum();
    if line_width == 0 {
        return 1;
    }
    (line_width as u16).div_ceil(width).max(1)
}

pub fn wrapped_line_count(lines: &[Line], width: u16) -> u16 {
    lines
        .iter()
        .map(|line| rows_for_line(line, width))
        .fold(0u16, u16::saturating_add)
}

pub fn max_scroll_offset(total_lines: u16, available_height: u16) -> u16 {
    total_lines.saturating_sub(available_height)
}
