//! Terminal implementation of the transcript view capability.
//!
//! The transcript pane redraws from the session's messages every frame, so
//! the view itself only tracks what the frame cannot derive: whether the
//! pending indicator is shown and where the viewport sits.

use crate::core::message::Message;
use crate::core::session::TranscriptView;

pub struct TuiView {
    pub pending_visible: bool,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
}

impl TuiView {
    pub fn new() -> Self {
        Self {
            pending_visible: false,
            scroll_offset: 0,
            auto_scroll: true,
        }
    }

    /// Manual scroll away from the tail parks the viewport.
    pub fn scroll_up(&mut self, amount: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scrolling back to the bottom re-engages following the tail.
    pub fn scroll_down(&mut self, amount: u16, max_offset: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_offset);
        if self.scroll_offset >= max_offset {
            self.auto_scroll = true;
        }
    }
}

impl Default for TuiView {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptView for TuiView {
    fn append(&mut self, _message: &Message) {
        // The newest content wins the viewport again on every append.
        self.auto_scroll = true;
    }

    fn set_pending_visible(&mut self, visible: bool) {
        self.pending_visible = visible;
    }

    fn clear(&mut self) {
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scroll_up_parks_the_viewport() {
        let mut view = TuiView::new();
        view.scroll_offset = 5;
        view.scroll_up(2);
        assert_eq!(view.scroll_offset, 3);
        assert!(!view.auto_scroll);
    }

    #[test]
    fn scrolling_to_the_bottom_resumes_following() {
        let mut view = TuiView::new();
        view.scroll_up(1);
        assert!(!view.auto_scroll);

        view.scroll_down(3, 2);
        assert_eq!(view.scroll_offset, 2);
        assert!(view.auto_scroll);
    }

    #[test]
    fn appends_snap_back_to_the_newest_content() {
        let mut view = TuiView::new();
        view.scroll_up(1);

        view.append(&Message::user("hi"));
        assert!(view.auto_scroll);
    }
}
