// src/reveal.rs
//
// Scroll position -> per-word reveal state. Everything here is pure so the
// page component only has to read metrics from the DOM and render the result.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealState {
    Upcoming,
    Current,
    Seen,
}

impl RevealState {
    pub fn class_name(self) -> &'static str {
        match self {
            RevealState::Upcoming => "upcoming",
            RevealState::Current => "current",
            RevealState::Seen => "seen",
        }
    }
}

/// Width tiers. Each tier covers widths up to and including its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    SmallDesktop,
    Desktop,
}

impl Breakpoint {
    pub fn from_width(width: f64) -> Self {
        if width <= 480.0 {
            Breakpoint::Mobile
        } else if width <= 768.0 {
            Breakpoint::Tablet
        } else if width <= 1024.0 {
            Breakpoint::SmallDesktop
        } else {
            Breakpoint::Desktop
        }
    }
}

/// Raw scroll geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn max_scroll(&self) -> f64 {
        self.document_height - self.viewport_height
    }
}

/// Everything the classification depends on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevealInputs {
    pub metrics: ScrollMetrics,
    pub total_units: usize,
    pub expanded: bool,
    /// The ordered list section has reached the middle of the viewport.
    pub list_reached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionRates {
    pub collapsed: f64,
    pub expanded: f64,
    pub expanded_past_list: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTuning {
    /// Fraction of viewport height scrolled before the reveal starts.
    pub start_trigger: f64,
    pub gradient_zone: usize,
    pub completion: CompletionRates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTuning {
    pub mobile: TierTuning,
    pub tablet: TierTuning,
    pub small_desktop: TierTuning,
    pub desktop: TierTuning,
    /// Progress at or above `1 - completion_snap` lands on the last unit.
    pub completion_snap: f64,
    /// Minimum number of trailing units forced to `Seen` at the end.
    pub tail_units: usize,
    pub initial_delay_ms: u32,
}

impl Default for RevealTuning {
    fn default() -> Self {
        Self {
            mobile: TierTuning {
                start_trigger: 0.10,
                gradient_zone: 1,
                completion: CompletionRates {
                    collapsed: 0.7,
                    expanded: 0.7,
                    expanded_past_list: 0.8,
                },
            },
            tablet: TierTuning {
                start_trigger: 0.15,
                gradient_zone: 1,
                completion: CompletionRates {
                    collapsed: 0.8,
                    expanded: 0.65,
                    expanded_past_list: 0.7,
                },
            },
            small_desktop: TierTuning {
                start_trigger: 0.20,
                gradient_zone: 2,
                completion: CompletionRates {
                    collapsed: 1.0,
                    expanded: 0.70,
                    expanded_past_list: 0.65,
                },
            },
            desktop: TierTuning {
                start_trigger: 0.25,
                gradient_zone: 2,
                completion: CompletionRates {
                    collapsed: 1.0,
                    expanded: 0.70,
                    expanded_past_list: 0.65,
                },
            },
            completion_snap: 0.02,
            tail_units: 2,
            initial_delay_ms: 200,
        }
    }
}

impl CompletionRates {
    fn select(&self, expanded: bool, list_reached: bool) -> f64 {
        match (expanded, list_reached) {
            (false, _) => self.collapsed,
            (true, false) => self.expanded,
            (true, true) => self.expanded_past_list,
        }
    }
}

impl RevealTuning {
    pub fn tier(&self, width: f64) -> &TierTuning {
        match Breakpoint::from_width(width) {
            Breakpoint::Mobile => &self.mobile,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::SmallDesktop => &self.small_desktop,
            Breakpoint::Desktop => &self.desktop,
        }
    }

    pub fn start_trigger(&self, metrics: &ScrollMetrics) -> f64 {
        metrics.viewport_height * self.tier(metrics.viewport_width).start_trigger
    }

    pub fn half_zone(&self, width: f64) -> usize {
        self.tier(width).gradient_zone / 2
    }

    /// Reveal progress in `[0, 1]`, or `None` while still at or above the
    /// start trigger.
    pub fn animation_progress(&self, inputs: &RevealInputs) -> Option<f64> {
        let metrics = &inputs.metrics;
        let trigger = self.start_trigger(metrics);
        if metrics.scroll_top <= trigger {
            return None;
        }

        let range = metrics.max_scroll() - trigger;
        if range <= 0.0 {
            return Some(0.0);
        }

        let scroll_percent = ((metrics.scroll_top - trigger) / range).clamp(0.0, 1.0);
        let rate = self
            .tier(metrics.viewport_width)
            .completion
            .select(inputs.expanded, inputs.list_reached);
        if rate <= 0.0 {
            return Some(1.0);
        }
        Some((scroll_percent / rate).clamp(0.0, 1.0))
    }

    pub fn current_index(&self, progress: f64, total_units: usize) -> usize {
        if progress >= 1.0 - self.completion_snap {
            return total_units;
        }
        let index = (progress * total_units as f64).round();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(total_units)
        }
    }

    /// Classify every unit for the given scroll position.
    pub fn classify(&self, inputs: &RevealInputs) -> Vec<RevealState> {
        let total = inputs.total_units;
        let Some(progress) = self.animation_progress(inputs) else {
            return vec![RevealState::Upcoming; total];
        };

        let current = self.current_index(progress, total) as isize;
        let half_zone = self.half_zone(inputs.metrics.viewport_width) as isize;

        let mut states: Vec<RevealState> = (0..total as isize)
            .map(|i| {
                let distance = i - (current - 1);
                if distance < -half_zone {
                    RevealState::Seen
                } else if distance.abs() <= half_zone {
                    RevealState::Current
                } else {
                    RevealState::Upcoming
                }
            })
            .collect();

        // Once the reveal reaches the end, the trailing window settles.
        if total > 0 && current as usize == total {
            let forced = self.tail_units.max(half_zone as usize + 1).min(total);
            for state in &mut states[total - forced..] {
                *state = RevealState::Seen;
            }
        }

        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn inputs(width: f64, scroll_top: f64, total_units: usize) -> RevealInputs {
        RevealInputs {
            metrics: ScrollMetrics {
                scroll_top,
                viewport_width: width,
                viewport_height: 800.0,
                document_height: 3000.0,
            },
            total_units,
            expanded: false,
            list_reached: false,
        }
    }

    fn count(states: &[RevealState], wanted: RevealState) -> usize {
        states.iter().filter(|s| **s == wanted).count()
    }

    #[rstest]
    #[case(320.0, Breakpoint::Mobile, 80.0)]
    #[case(480.0, Breakpoint::Mobile, 80.0)]
    #[case(600.0, Breakpoint::Tablet, 120.0)]
    #[case(1024.0, Breakpoint::SmallDesktop, 160.0)]
    #[case(1440.0, Breakpoint::Desktop, 200.0)]
    fn test_trigger_by_breakpoint(
        #[case] width: f64,
        #[case] breakpoint: Breakpoint,
        #[case] trigger: f64,
    ) {
        let tuning = RevealTuning::default();
        assert_eq!(Breakpoint::from_width(width), breakpoint);
        let got = tuning.start_trigger(&inputs(width, 0.0, 10).metrics);
        assert!((got - trigger).abs() < 1e-9, "{} != {}", got, trigger);
    }

    #[rstest]
    #[case(400.0, false, false, 0.7)]
    #[case(400.0, true, true, 0.8)]
    #[case(700.0, false, false, 0.8)]
    #[case(700.0, true, false, 0.65)]
    #[case(700.0, true, true, 0.7)]
    #[case(1300.0, false, true, 1.0)]
    #[case(1300.0, true, false, 0.7)]
    #[case(1300.0, true, true, 0.65)]
    fn test_completion_rates(
        #[case] width: f64,
        #[case] expanded: bool,
        #[case] list_reached: bool,
        #[case] rate: f64,
    ) {
        let tuning = RevealTuning::default();
        let got = tuning.tier(width).completion.select(expanded, list_reached);
        assert!((got - rate).abs() < 1e-9);
    }

    #[test]
    fn test_all_upcoming_at_or_above_trigger() {
        let tuning = RevealTuning::default();
        for width in [400.0, 700.0, 900.0, 1400.0] {
            let trigger = tuning.start_trigger(&inputs(width, 0.0, 0).metrics);
            for scroll_top in [0.0, trigger / 2.0, trigger] {
                let states = tuning.classify(&inputs(width, scroll_top, 25));
                assert_eq!(count(&states, RevealState::Upcoming), 25);
            }
        }
    }

    #[test]
    fn test_full_scroll_is_all_seen() {
        let tuning = RevealTuning::default();
        for width in [400.0, 700.0, 900.0, 1400.0] {
            for total in [1, 2, 3, 40] {
                let states = tuning.classify(&inputs(width, 2200.0, total));
                assert_eq!(count(&states, RevealState::Seen), total, "width {}", width);
            }
        }
    }

    #[test]
    fn test_mobile_full_scroll_example() {
        // 400px wide, scrolled to the very bottom.
        let tuning = RevealTuning::default();
        let input = inputs(400.0, 2200.0, 12);
        let progress = tuning.animation_progress(&input).unwrap();
        assert_eq!(progress, 1.0);
        assert_eq!(tuning.current_index(progress, 12), 12);
        assert!(tuning.classify(&input).iter().all(|s| *s == RevealState::Seen));
    }

    #[test]
    fn test_snap_near_completion() {
        let tuning = RevealTuning::default();
        assert_eq!(tuning.current_index(0.985, 100), 100);
        assert_eq!(tuning.current_index(0.5, 100), 50);
        assert_eq!(tuning.current_index(0.0, 100), 0);
        assert_eq!(tuning.current_index(0.3, 0), 0);
    }

    #[test]
    fn test_mid_scroll_has_a_gradient_window() {
        let tuning = RevealTuning::default();
        // Desktop: trigger 200, range 2000, halfway = 1200.
        let input = inputs(1400.0, 1200.0, 100);
        let states = tuning.classify(&input);

        // current index 50, window centred on unit 49 with half zone 1.
        assert_eq!(states[47], RevealState::Seen);
        assert_eq!(states[48], RevealState::Current);
        assert_eq!(states[49], RevealState::Current);
        assert_eq!(states[50], RevealState::Current);
        assert_eq!(states[51], RevealState::Upcoming);
        assert_eq!(count(&states, RevealState::Current), 3);
    }

    #[test]
    fn test_mobile_window_is_single_unit() {
        let tuning = RevealTuning::default();
        // Mobile: trigger 80, range 2120, rate 0.7.
        let scroll_top = 80.0 + 2120.0 * 0.35;
        let states = tuning.classify(&inputs(400.0, scroll_top, 100));
        assert_eq!(count(&states, RevealState::Current), 1);
        assert_eq!(states[49], RevealState::Current);
        assert_eq!(states[48], RevealState::Seen);
        assert_eq!(states[50], RevealState::Upcoming);
    }

    #[test]
    fn test_expansion_accelerates_progress() {
        let tuning = RevealTuning::default();
        let collapsed = inputs(1400.0, 900.0, 100);
        let expanded = RevealInputs {
            expanded: true,
            ..collapsed
        };
        let a = tuning.animation_progress(&collapsed).unwrap();
        let b = tuning.animation_progress(&expanded).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let tuning = RevealTuning::default();
        for scroll_top in [0.0, 350.0, 1111.0, 2199.0] {
            let input = inputs(900.0, scroll_top, 57);
            assert_eq!(tuning.classify(&input), tuning.classify(&input));
        }
    }

    #[test]
    fn test_short_document_never_progresses() {
        let tuning = RevealTuning::default();
        let input = RevealInputs {
            metrics: ScrollMetrics {
                scroll_top: 500.0,
                viewport_width: 1400.0,
                viewport_height: 800.0,
                document_height: 900.0,
            },
            total_units: 5,
            ..Default::default()
        };
        assert_eq!(tuning.animation_progress(&input), Some(0.0));
        let states = tuning.classify(&input);
        assert_eq!(states[0], RevealState::Current);
        assert_eq!(count(&states, RevealState::Upcoming), 4);
    }

    #[test]
    fn test_empty_content() {
        let tuning = RevealTuning::default();
        assert!(tuning.classify(&inputs(1400.0, 2200.0, 0)).is_empty());
    }

    /// Seen units, then current units, then upcoming units.
    fn is_ordered(states: &[RevealState]) -> bool {
        let rank = |s: &RevealState| match s {
            RevealState::Seen => 0,
            RevealState::Current => 1,
            RevealState::Upcoming => 2,
        };
        states.windows(2).all(|pair| rank(&pair[0]) <= rank(&pair[1]))
    }

    #[test]
    fn test_states_stay_in_reading_order() {
        let tuning = RevealTuning::default();
        for width in [400.0, 700.0, 900.0, 1400.0] {
            for total in [1, 2, 3, 10, 40, 75] {
                for step in 0..=60 {
                    let scroll_top = step as f64 * 2200.0 / 60.0;
                    let states = tuning.classify(&inputs(width, scroll_top, total));
                    assert!(is_ordered(&states), "width {} total {} at {}: {:?}", width, total, scroll_top, states);
                }
            }
        }
    }

    #[test]
    fn test_window_near_the_end_is_not_forced() {
        let tuning = RevealTuning::default();
        // Desktop, progress 0.9 of 10 units: current index 9.
        let states = tuning.classify(&inputs(1400.0, 200.0 + 2000.0 * 0.9, 10));
        assert_eq!(count(&states, RevealState::Seen), 7);
        assert_eq!(&states[7..], &[RevealState::Current; 3]);
    }

    #[test]
    fn test_single_unit_just_past_trigger_is_current() {
        let tuning = RevealTuning::default();
        let states = tuning.classify(&inputs(1400.0, 201.0, 1));
        assert_eq!(states, vec![RevealState::Current]);
    }
}
