//! Tolerance, rounding, and window clamping of recorded intervals.

use timeledger_shared::types::{MINUTES_PER_DAY, MinuteOfDay};

use crate::booking::RawInterval;
use crate::day_plan::DayPlan;

/// An interval after the plan's rules were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveInterval {
    /// Credited start minute.
    pub start: i32,
    /// Credited end minute.
    pub end: i32,
}

impl EffectiveInterval {
    /// Credited length in minutes.
    #[must_use]
    pub fn length(&self) -> i32 {
        self.end - self.start
    }
}

/// Intervals after adjustment, with the starts that had to be moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustedIntervals {
    /// Non-empty, non-overlapping intervals in chronological order.
    pub intervals: Vec<EffectiveInterval>,
    /// Adjusted starts that fell before the previous interval's end.
    pub overlaps: Vec<MinuteOfDay>,
}

impl AdjustedIntervals {
    /// Sum of interval lengths.
    #[must_use]
    pub fn gross_minutes(&self) -> i32 {
        self.intervals.iter().map(EffectiveInterval::length).sum()
    }

    /// Minutes between consecutive intervals.
    #[must_use]
    pub fn gap_minutes(&self) -> i32 {
        self.intervals
            .windows(2)
            .map(|pair| pair[1].start - pair[0].end)
            .sum()
    }
}

/// Applies tolerance, rounding, and window clamping to each interval.
///
/// Starts: late-arrival tolerance, arrival rounding, then the earliest
/// credited arrival. Ends: early-departure tolerance, departure rounding,
/// then the latest credited departure. Zero-length recorded intervals are
/// skipped.
#[must_use]
pub fn adjust_intervals(plan: &DayPlan, raw: &[RawInterval]) -> AdjustedIntervals {
    let mut adjusted = AdjustedIntervals::default();
    let mut previous_end: Option<i32> = None;

    for interval in raw.iter().filter(|interval| interval.length() > 0) {
        let mut start = adjust_start(plan, interval.start.as_i32());
        let end = adjust_end(plan, interval.end.as_i32());

        if let Some(previous_end) = previous_end
            && start < previous_end
        {
            adjusted.overlaps.push(MinuteOfDay::saturating(start));
            start = previous_end;
        }

        if end <= start {
            continue;
        }
        adjusted.intervals.push(EffectiveInterval { start, end });
        previous_end = Some(end);
    }

    adjusted
}

/// Effective start minute for a clock-in at `minute`.
#[must_use]
pub fn adjust_start(plan: &DayPlan, minute: i32) -> i32 {
    let tolerance = &plan.tolerance;
    let mut start = minute;

    if let Some(boundary) = plan.come_to.or(plan.come_from) {
        let boundary = boundary.as_i32();
        if start > boundary && start <= boundary + i32::from(tolerance.come_plus) {
            start = boundary;
        }
    }

    start = plan.arrival_rounding.apply(start);

    if let Some(come_from) = plan.come_from {
        start = start.max(come_from.as_i32() - i32::from(tolerance.come_minus));
    }

    clamp_to_day(start)
}

/// Effective end minute for a clock-out at `minute`.
#[must_use]
pub fn adjust_end(plan: &DayPlan, minute: i32) -> i32 {
    let tolerance = &plan.tolerance;
    let mut end = minute;

    if let Some(boundary) = plan.go_from.or(plan.go_to) {
        let boundary = boundary.as_i32();
        if end < boundary && end >= boundary - i32::from(tolerance.go_minus) {
            end = boundary;
        }
    }

    end = plan.departure_rounding.apply(end);

    if let Some(go_to) = plan.go_to {
        end = end.min(go_to.as_i32() + i32::from(tolerance.go_plus));
    }

    clamp_to_day(end)
}

fn clamp_to_day(minute: i32) -> i32 {
    minute.clamp(0, i32::from(MINUTES_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_plan::{Rounding, RoundingMode, Tolerance};

    fn m(hours: u16, minutes: u16) -> MinuteOfDay {
        MinuteOfDay::from_hm(hours, minutes).unwrap()
    }

    fn hm(hours: i32, minutes: i32) -> i32 {
        hours * 60 + minutes
    }

    fn flex_plan() -> DayPlan {
        let mut plan = DayPlan::with_target("FLEX", 480);
        plan.come_from = Some(m(7, 0));
        plan.come_to = Some(m(9, 0));
        plan.go_from = Some(m(15, 0));
        plan.go_to = Some(m(19, 0));
        plan
    }

    #[test]
    fn test_no_rules_keeps_minutes() {
        let plan = DayPlan::with_target("PLAIN", 480);
        assert_eq!(adjust_start(&plan, hm(8, 3)), hm(8, 3));
        assert_eq!(adjust_end(&plan, hm(16, 57)), hm(16, 57));
    }

    #[test]
    fn test_late_arrival_within_tolerance_is_on_time() {
        let mut plan = flex_plan();
        plan.tolerance = Tolerance {
            come_plus: 5,
            ..Tolerance::default()
        };
        assert_eq!(adjust_start(&plan, hm(9, 4)), hm(9, 0));
        assert_eq!(adjust_start(&plan, hm(9, 5)), hm(9, 0));
        assert_eq!(adjust_start(&plan, hm(9, 6)), hm(9, 6));
    }

    #[test]
    fn test_early_arrival_is_clamped() {
        let mut plan = flex_plan();
        assert_eq!(adjust_start(&plan, hm(6, 30)), hm(7, 0));

        plan.tolerance.come_minus = 15;
        assert_eq!(adjust_start(&plan, hm(6, 30)), hm(6, 45));
        assert_eq!(adjust_start(&plan, hm(6, 50)), hm(6, 50));
    }

    #[test]
    fn test_early_departure_within_tolerance_is_on_time() {
        let mut plan = flex_plan();
        plan.tolerance.go_minus = 10;
        assert_eq!(adjust_end(&plan, hm(14, 50)), hm(15, 0));
        assert_eq!(adjust_end(&plan, hm(14, 49)), hm(14, 49));
    }

    #[test]
    fn test_late_departure_is_clamped() {
        let mut plan = flex_plan();
        assert_eq!(adjust_end(&plan, hm(20, 0)), hm(19, 0));

        plan.tolerance.go_plus = 30;
        assert_eq!(adjust_end(&plan, hm(20, 0)), hm(19, 30));
    }

    #[test]
    fn test_tolerance_before_rounding() {
        let mut plan = flex_plan();
        plan.tolerance.come_plus = 3;
        plan.arrival_rounding = Rounding::new(RoundingMode::Up, 15);

        // Forgiven to 09:00, which is already on the grid.
        assert_eq!(adjust_start(&plan, hm(9, 2)), hm(9, 0));
        // Outside tolerance, rounded up.
        assert_eq!(adjust_start(&plan, hm(9, 4)), hm(9, 15));
    }

    #[test]
    fn test_overlap_after_rounding_moves_start() {
        let mut plan = DayPlan::with_target("ROUND", 480);
        plan.arrival_rounding = Rounding::new(RoundingMode::Down, 15);
        plan.departure_rounding = Rounding::new(RoundingMode::Up, 15);

        let raw = [
            RawInterval { start: m(8, 0), end: m(12, 2) },
            RawInterval { start: m(12, 10), end: m(16, 0) },
        ];
        let adjusted = adjust_intervals(&plan, &raw);

        assert_eq!(adjusted.overlaps, vec![m(12, 0)]);
        assert_eq!(
            adjusted.intervals,
            vec![
                EffectiveInterval { start: hm(8, 0), end: hm(12, 15) },
                EffectiveInterval { start: hm(12, 15), end: hm(16, 0) },
            ]
        );
        assert_eq!(adjusted.gross_minutes(), 480);
        assert_eq!(adjusted.gap_minutes(), 0);
    }

    #[test]
    fn test_zero_length_interval_does_not_collide() {
        let mut plan = DayPlan::with_target("ROUND", 480);
        plan.arrival_rounding = Rounding::new(RoundingMode::Down, 15);
        plan.departure_rounding = Rounding::new(RoundingMode::Up, 15);

        let raw = [
            RawInterval { start: m(8, 0), end: m(12, 2) },
            RawInterval { start: m(12, 2), end: m(12, 2) },
        ];
        let adjusted = adjust_intervals(&plan, &raw);

        assert!(adjusted.overlaps.is_empty());
        assert_eq!(
            adjusted.intervals,
            vec![EffectiveInterval { start: hm(8, 0), end: hm(12, 15) }]
        );
    }

    #[test]
    fn test_interval_outside_window_is_dropped() {
        let plan = flex_plan();
        let raw = [
            RawInterval { start: m(5, 0), end: m(6, 30) },
            RawInterval { start: m(8, 0), end: m(16, 0) },
        ];
        let adjusted = adjust_intervals(&plan, &raw);

        assert!(adjusted.overlaps.is_empty());
        assert_eq!(
            adjusted.intervals,
            vec![EffectiveInterval { start: hm(8, 0), end: hm(16, 0) }]
        );
    }
}
