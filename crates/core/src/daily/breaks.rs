//! Break deduction.

use crate::day_plan::BreakRule;

use super::adjust::EffectiveInterval;

/// Minutes deducted for breaks, split by rule kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakDeduction {
    /// Worked minutes inside fixed break windows.
    pub fixed_minutes: i32,
    /// Shortfall against the largest applicable minimum break.
    pub minimum_minutes: i32,
}

impl BreakDeduction {
    /// Total deduction.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.fixed_minutes + self.minimum_minutes
    }
}

/// Computes the break deduction for a day.
///
/// Fixed windows deduct the worked time overlapping them. Minimum rules
/// apply once `gross` exceeds their threshold; the largest applicable
/// duration is required, and recorded gaps plus fixed deductions count
/// toward it. The total never exceeds `gross`.
#[must_use]
pub fn deduct_breaks(
    rules: &[BreakRule],
    intervals: &[EffectiveInterval],
    gross: i32,
    gap_minutes: i32,
) -> BreakDeduction {
    let fixed_minutes: i32 = rules
        .iter()
        .filter_map(|rule| match rule {
            BreakRule::Fixed { window } => Some(window),
            BreakRule::Minimum { .. } => None,
        })
        .map(|window| {
            intervals
                .iter()
                .map(|interval| window.overlap(interval.start, interval.end))
                .sum::<i32>()
        })
        .sum();
    let fixed_minutes = fixed_minutes.min(gross);

    let required = rules
        .iter()
        .filter_map(|rule| match rule {
            BreakRule::Minimum {
                after_minutes,
                duration,
            } if gross > *after_minutes => Some(*duration),
            _ => None,
        })
        .max()
        .unwrap_or(0);

    let taken = gap_minutes + fixed_minutes;
    let minimum_minutes = (required - taken).max(0).min(gross - fixed_minutes);

    BreakDeduction {
        fixed_minutes,
        minimum_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_plan::TimeWindow;
    use rstest::rstest;
    use timeledger_shared::types::MinuteOfDay;

    fn interval(start: i32, end: i32) -> EffectiveInterval {
        EffectiveInterval { start, end }
    }

    fn lunch() -> BreakRule {
        BreakRule::Fixed {
            window: TimeWindow::new(
                MinuteOfDay::from_hm(12, 0).unwrap(),
                MinuteOfDay::from_hm(12, 30).unwrap(),
            ),
        }
    }

    fn minimum(after_minutes: i32, duration: i32) -> BreakRule {
        BreakRule::Minimum {
            after_minutes,
            duration,
        }
    }

    #[test]
    fn test_fixed_window_overlap() {
        let deduction = deduct_breaks(&[lunch()], &[interval(480, 960)], 480, 0);
        assert_eq!(deduction.fixed_minutes, 30);
        assert_eq!(deduction.total(), 30);
    }

    #[test]
    fn test_fixed_window_not_worked() {
        let intervals = [interval(480, 720), interval(750, 960)];
        let deduction = deduct_breaks(&[lunch()], &intervals, 450, 30);
        assert_eq!(deduction.total(), 0);
    }

    #[rstest]
    // Below threshold: nothing required.
    #[case(360, 0, 0)]
    // Above the first threshold, no gap taken.
    #[case(400, 0, 30)]
    // Gap counts toward the requirement.
    #[case(400, 20, 10)]
    #[case(400, 45, 0)]
    // Above the second threshold the larger duration applies.
    #[case(600, 30, 15)]
    fn test_minimum_break(#[case] gross: i32, #[case] gaps: i32, #[case] expected: i32) {
        let rules = [minimum(540, 45), minimum(360, 30)];
        let deduction = deduct_breaks(&rules, &[interval(0, gross)], gross, gaps);
        assert_eq!(deduction.minimum_minutes, expected);
    }

    #[test]
    fn test_fixed_counts_toward_minimum() {
        let rules = [lunch(), minimum(360, 45)];
        let deduction = deduct_breaks(&rules, &[interval(480, 1020)], 540, 0);
        assert_eq!(deduction.fixed_minutes, 30);
        assert_eq!(deduction.minimum_minutes, 15);
    }

    #[test]
    fn test_deduction_never_exceeds_gross() {
        let deduction = deduct_breaks(&[minimum(0, 60)], &[interval(0, 20)], 20, 0);
        assert_eq!(deduction.total(), 20);
    }
}
