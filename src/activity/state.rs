use std::time::Duration;

use crate::context::{ActivityEventType, PageOffsets};

/// Scroll-depth accumulator. Only maxima are kept; a page that scrolls up
/// and back down never reports a shrinking depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollOffsets {
    pub max_scroll_y: u32,
    pub document_height: u32,
    pub viewport_height: u32,
}

impl ScrollOffsets {
    pub fn record(&mut self, scroll_y: u32, document_height: u32, viewport_height: u32) {
        self.max_scroll_y = self.max_scroll_y.max(scroll_y);
        self.document_height = self.document_height.max(document_height);
        self.viewport_height = viewport_height;
    }

    /// Percentage of the document that has been inside the viewport, capped
    /// at 100. Zero until a document height is known.
    pub fn percent_viewed(&self) -> u8 {
        if self.document_height == 0 {
            return 0;
        }
        let viewed = u64::from(self.max_scroll_y) + u64::from(self.viewport_height);
        let percent = viewed * 100 / u64::from(self.document_height);
        percent.min(100) as u8
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Mutable state shared between the ping loop and the collector surface.
#[derive(Debug, Clone, Default)]
pub struct ActivityState {
    pub offsets: ScrollOffsets,
    pub pings: u32,
}

impl ActivityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_offsets(
        &self,
        ping_interval: Duration,
        event_type: ActivityEventType,
    ) -> PageOffsets {
        PageOffsets {
            max_scroll_y: self.offsets.max_scroll_y,
            document_height: self.offsets.document_height,
            viewport_height: self.offsets.viewport_height,
            percent_viewed: self.offsets.percent_viewed(),
            pings: self.pings,
            ping_interval_secs: ping_interval.as_secs(),
            event_type,
        }
    }

    pub fn reset(&mut self) {
        self.offsets.reset();
        self.pings = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_viewed_caps_at_hundred() {
        let mut offsets = ScrollOffsets::default();
        offsets.record(5000, 2000, 800);
        assert_eq!(offsets.percent_viewed(), 100);
    }

    #[test]
    fn percent_viewed_zero_without_document_height() {
        let offsets = ScrollOffsets::default();
        assert_eq!(offsets.percent_viewed(), 0);
    }

    #[test]
    fn record_keeps_maxima() {
        let mut offsets = ScrollOffsets::default();
        offsets.record(400, 2000, 800);
        offsets.record(100, 2000, 800);
        assert_eq!(offsets.max_scroll_y, 400);
        assert_eq!(offsets.percent_viewed(), 60);
    }

    #[test]
    fn reset_clears_offsets_and_pings() {
        let mut state = ActivityState::new();
        state.offsets.record(400, 2000, 800);
        state.pings = 7;
        state.reset();
        assert_eq!(state.pings, 0);
        assert_eq!(state.offsets, ScrollOffsets::default());
    }
}
