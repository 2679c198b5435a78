// src/scroll_fx.rs
//
// Viewport-relative effects outside the word reveal: the home page projects
// teaser and the listing page per-item fade.

/// Vertical extent of an element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

const TEASER_VISIBLE_AT: f64 = 0.8;
const TEASER_ANIMATE_AT: f64 = 0.7;
const LIST_REACHED_AT: f64 = 0.5;

const FADE_TRIGGER_TOP: f64 = 0.8;
const FADE_TRIGGER_BOTTOM: f64 = 0.2;
const FADE_IN_BAND: f64 = 0.3;
/// Items at or below this ratio are treated as hidden.
const FADE_VISIBLE_MIN: f64 = 0.1;

/// One-way latches for the projects teaser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeaserState {
    pub visible: bool,
    pub animate_due: bool,
}

impl TeaserState {
    /// Latch whichever thresholds the section has crossed. Returns true when
    /// the animate threshold was crossed for the first time.
    pub fn observe(&mut self, span: Span, viewport_height: f64) -> bool {
        let on_screen = span.bottom >= 0.0;
        if on_screen && span.top <= viewport_height * TEASER_VISIBLE_AT {
            self.visible = true;
        }
        if on_screen && !self.animate_due && span.top <= viewport_height * TEASER_ANIMATE_AT {
            self.animate_due = true;
            return true;
        }
        false
    }
}

/// True once the element's top edge has reached the middle of the viewport.
pub fn scrolled_past(span: Span, viewport_height: f64) -> bool {
    span.top <= viewport_height * LIST_REACHED_AT
}

/// Opacity for a listing item at this position, in `[0, 1]`.
pub fn fade_ratio(span: Span, viewport_height: f64) -> f64 {
    let trigger_top = viewport_height * FADE_TRIGGER_TOP;
    let trigger_bottom = viewport_height * FADE_TRIGGER_BOTTOM;

    if !(span.bottom > trigger_bottom && span.top < trigger_top) {
        return 0.0;
    }

    let mut ratio: f64 = 1.0;
    if span.top > 0.0 {
        ratio = ((trigger_top - span.top) / (trigger_top * FADE_IN_BAND)).min(1.0);
    }
    if span.bottom < viewport_height {
        let fade_out = (span.bottom / (trigger_bottom * 2.0)).min(1.0);
        ratio = ratio.min(fade_out);
    }
    ratio.clamp(0.0, 1.0)
}

/// What the caller has to do after feeding an item its latest fade ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeUpdate {
    Unchanged,
    Changed,
    /// First time visible: schedule the staggered appearance.
    ScheduleAppear,
    /// Hidden again before the scheduled appearance ran.
    CancelAppear,
}

/// Listing item fade. Until its first appearance has run, an item stays at
/// opacity 0 and only remembers the ratio it should appear with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemFade {
    pub opacity: f64,
    pub animated: bool,
    pending_opacity: f64,
    appear_pending: bool,
}

impl ItemFade {
    pub fn observe(&mut self, ratio: f64) -> FadeUpdate {
        if ratio > FADE_VISIBLE_MIN {
            if self.animated {
                let changed = self.opacity != ratio;
                self.opacity = ratio;
                return if changed { FadeUpdate::Changed } else { FadeUpdate::Unchanged };
            }
            self.pending_opacity = ratio;
            if self.appear_pending {
                return FadeUpdate::Unchanged;
            }
            self.appear_pending = true;
            return FadeUpdate::ScheduleAppear;
        }

        if self.appear_pending {
            self.appear_pending = false;
            return FadeUpdate::CancelAppear;
        }
        let changed = self.animated || self.opacity != 0.0;
        self.animated = false;
        self.opacity = 0.0;
        if changed {
            FadeUpdate::Changed
        } else {
            FadeUpdate::Unchanged
        }
    }

    /// Run the scheduled appearance. Returns false if it was cancelled.
    pub fn appear(&mut self) -> bool {
        if !self.appear_pending {
            return false;
        }
        self.appear_pending = false;
        self.animated = true;
        self.opacity = self.pending_opacity;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 1000.0;

    fn span(top: f64, bottom: f64) -> Span {
        Span { top, bottom }
    }

    #[test]
    fn test_teaser_latches() {
        let mut teaser = TeaserState::default();
        assert!(!teaser.observe(span(900.0, 1300.0), VH));
        assert!(!teaser.visible);

        assert!(!teaser.observe(span(750.0, 1150.0), VH));
        assert!(teaser.visible);
        assert!(!teaser.animate_due);

        assert!(teaser.observe(span(650.0, 1050.0), VH));
        assert!(!teaser.observe(span(500.0, 900.0), VH));

        // Scrolling back up does not undo either latch.
        teaser.observe(span(1200.0, 1600.0), VH);
        assert!(teaser.visible && teaser.animate_due);
    }

    #[test]
    fn test_teaser_above_viewport_is_ignored() {
        let mut teaser = TeaserState::default();
        assert!(!teaser.observe(span(-800.0, -10.0), VH));
        assert_eq!(teaser, TeaserState::default());
    }

    #[test]
    fn test_scrolled_past() {
        assert!(scrolled_past(span(500.0, 900.0), VH));
        assert!(scrolled_past(span(-20.0, 300.0), VH));
        assert!(!scrolled_past(span(501.0, 900.0), VH));
    }

    #[test]
    fn test_fade_outside_band_is_zero() {
        assert_eq!(fade_ratio(span(800.0, 1200.0), VH), 0.0);
        assert_eq!(fade_ratio(span(-400.0, 200.0), VH), 0.0);
    }

    #[test]
    fn test_fade_in_from_bottom() {
        // trigger top 800, band 240
        assert!((fade_ratio(span(680.0, 1300.0), VH) - 0.5).abs() < 1e-9);
        assert_eq!(fade_ratio(span(500.0, 1100.0), VH), 1.0);
    }

    #[test]
    fn test_fade_out_at_top() {
        // leaving through the top: bottom 300 against a 400px fade band
        assert!((fade_ratio(span(-100.0, 300.0), VH) - 0.75).abs() < 1e-9);
        assert_eq!(fade_ratio(span(-100.0, 900.0), VH), 1.0);
    }

    #[test]
    fn test_item_appears_once_with_latest_ratio() {
        let mut item = ItemFade::default();
        assert_eq!(item.observe(0.4), FadeUpdate::ScheduleAppear);
        assert_eq!(item.observe(0.6), FadeUpdate::Unchanged);
        assert_eq!(item.opacity, 0.0);
        assert!(!item.animated);

        assert!(item.appear());
        assert!(item.animated);
        assert_eq!(item.opacity, 0.6);
        assert!(!item.appear());

        assert_eq!(item.observe(0.9), FadeUpdate::Changed);
        assert_eq!(item.observe(0.9), FadeUpdate::Unchanged);
        assert_eq!(item.opacity, 0.9);
    }

    #[test]
    fn test_item_hidden_before_appearing_is_cancelled() {
        let mut item = ItemFade::default();
        assert_eq!(item.observe(0.5), FadeUpdate::ScheduleAppear);
        assert_eq!(item.observe(0.05), FadeUpdate::CancelAppear);
        assert!(!item.appear());
        assert!(!item.animated);
        assert_eq!(item.opacity, 0.0);

        // Visible again: a fresh appearance is scheduled.
        assert_eq!(item.observe(0.5), FadeUpdate::ScheduleAppear);
    }

    #[test]
    fn test_item_hidden_after_appearing_resets() {
        let mut item = ItemFade::default();
        item.observe(0.7);
        item.appear();
        assert_eq!(item.observe(0.0), FadeUpdate::Changed);
        assert!(!item.animated);
        assert_eq!(item.opacity, 0.0);
        assert_eq!(item.observe(0.0), FadeUpdate::Unchanged);
        assert_eq!(item.observe(0.3), FadeUpdate::ScheduleAppear);
    }
}
