//! Day plan (shift template) types.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::{AccountId, DayPlanId, MinuteOfDay};

/// How a booking minute is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Keep the booked minute.
    #[default]
    None,
    /// Round up to the next multiple of the interval.
    Up,
    /// Round down to the previous multiple of the interval.
    Down,
    /// Round to the nearest multiple; exact midpoints round up.
    Nearest,
}

/// Rounding rule for one booking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rounding {
    /// Rounding mode.
    pub mode: RoundingMode,
    /// Interval in minutes. Zero disables rounding.
    pub interval: u16,
}

impl Rounding {
    /// Creates a rounding rule.
    #[must_use]
    pub const fn new(mode: RoundingMode, interval: u16) -> Self {
        Self { mode, interval }
    }

    /// Applies the rule to a minute value.
    #[must_use]
    pub fn apply(&self, minute: i32) -> i32 {
        let interval = i32::from(self.interval);
        if interval == 0 {
            return minute;
        }
        let remainder = minute.rem_euclid(interval);
        if remainder == 0 {
            return minute;
        }
        let down = minute - remainder;
        match self.mode {
            RoundingMode::None => minute,
            RoundingMode::Up => down + interval,
            RoundingMode::Down => down,
            RoundingMode::Nearest => {
                if remainder * 2 >= interval {
                    down + interval
                } else {
                    down
                }
            }
        }
    }
}

/// Tolerance minutes around the plan's come/go boundaries.
///
/// `minus` applies before a boundary, `plus` after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tolerance {
    /// Late arrival forgiven after the arrival boundary.
    pub come_plus: u16,
    /// Early arrival credited before the earliest arrival.
    pub come_minus: u16,
    /// Late departure credited after the latest departure.
    pub go_plus: u16,
    /// Early departure forgiven before the departure boundary.
    pub go_minus: u16,
}

/// A span of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window.
    pub start: MinuteOfDay,
    /// End of the window.
    pub end: MinuteOfDay,
}

impl TimeWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self { start, end }
    }

    /// Minutes of overlap with `[start, end)`.
    #[must_use]
    pub fn overlap(&self, start: i32, end: i32) -> i32 {
        let from = start.max(self.start.as_i32());
        let to = end.min(self.end.as_i32());
        (to - from).max(0)
    }
}

/// Break deduction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakRule {
    /// A break at a fixed time, deducted where worked time overlaps it.
    Fixed {
        /// The break window.
        window: TimeWindow,
    },
    /// Once gross time exceeds `after_minutes`, at least `duration` minutes
    /// of break must have been taken; the shortfall is deducted.
    Minimum {
        /// Gross minutes after which the break is required.
        after_minutes: i32,
        /// Required break length in minutes.
        duration: i32,
    },
}

/// A shift template for one day.
///
/// Read-only input to the engine, authored by administrative tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Unique identifier.
    pub id: DayPlanId,
    /// Short code (e.g. "FLEX-8").
    pub code: String,
    /// Earliest credited arrival.
    pub come_from: Option<MinuteOfDay>,
    /// Latest on-time arrival.
    pub come_to: Option<MinuteOfDay>,
    /// Earliest on-time departure.
    pub go_from: Option<MinuteOfDay>,
    /// Latest credited departure.
    pub go_to: Option<MinuteOfDay>,
    /// Mandatory presence window.
    pub core_time: Option<TimeWindow>,
    /// Tolerance minutes.
    pub tolerance: Tolerance,
    /// Rounding applied to interval starts.
    pub arrival_rounding: Rounding,
    /// Rounding applied to interval ends.
    pub departure_rounding: Rounding,
    /// Target minutes for the day.
    pub regular_minutes: Option<i32>,
    /// Minimum net minutes expected when working.
    pub min_net_minutes: Option<i32>,
    /// Maximum creditable net minutes.
    pub max_net_minutes: Option<i32>,
    /// Whether the reported net is limited to `max_net_minutes`.
    pub cap_reported_net: bool,
    /// Break deduction rules.
    pub breaks: Vec<BreakRule>,
    /// Account receiving the day's net minutes.
    pub net_account_id: Option<AccountId>,
    /// Account receiving minutes above `max_net_minutes`.
    pub cap_account_id: Option<AccountId>,
}

impl DayPlan {
    /// Creates a plan with the given target and no further rules.
    #[must_use]
    pub fn with_target(code: impl Into<String>, regular_minutes: i32) -> Self {
        Self {
            id: DayPlanId::new(),
            code: code.into(),
            come_from: None,
            come_to: None,
            go_from: None,
            go_to: None,
            core_time: None,
            tolerance: Tolerance::default(),
            arrival_rounding: Rounding::default(),
            departure_rounding: Rounding::default(),
            regular_minutes: Some(regular_minutes),
            min_net_minutes: None,
            max_net_minutes: None,
            cap_reported_net: false,
            breaks: Vec::new(),
            net_account_id: None,
            cap_account_id: None,
        }
    }
}

/// Seven optional day plans, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekPlan {
    /// Plan per weekday; `None` means no plan is assigned.
    pub days: [Option<DayPlanId>; 7],
}

impl WeekPlan {
    /// Uses `plan` Monday to Friday and leaves the weekend free.
    #[must_use]
    pub const fn weekdays(plan: DayPlanId) -> Self {
        Self {
            days: [
                Some(plan),
                Some(plan),
                Some(plan),
                Some(plan),
                Some(plan),
                None,
                None,
            ],
        }
    }

    /// Returns the plan assigned to `weekday`.
    #[must_use]
    pub fn plan_for(&self, weekday: Weekday) -> Option<DayPlanId> {
        self.days[weekday.num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RoundingMode::Up, 15, 482, 495)]
    #[case(RoundingMode::Up, 15, 480, 480)]
    #[case(RoundingMode::Down, 15, 494, 480)]
    #[case(RoundingMode::Nearest, 15, 487, 480)]
    #[case(RoundingMode::Nearest, 15, 488, 495)]
    #[case(RoundingMode::Nearest, 10, 485, 490)]
    #[case(RoundingMode::None, 15, 487, 487)]
    #[case(RoundingMode::Up, 0, 487, 487)]
    fn test_rounding(
        #[case] mode: RoundingMode,
        #[case] interval: u16,
        #[case] minute: i32,
        #[case] expected: i32,
    ) {
        assert_eq!(Rounding::new(mode, interval).apply(minute), expected);
    }

    #[test]
    fn test_window_overlap() {
        let window = TimeWindow::new(
            MinuteOfDay::from_hm(12, 0).unwrap(),
            MinuteOfDay::from_hm(12, 30).unwrap(),
        );
        assert_eq!(window.overlap(480, 960), 30);
        assert_eq!(window.overlap(735, 960), 15);
        assert_eq!(window.overlap(480, 700), 0);
    }

    #[test]
    fn test_week_plan_weekdays() {
        let plan = DayPlanId::new();
        let week = WeekPlan::weekdays(plan);
        assert_eq!(week.plan_for(Weekday::Mon), Some(plan));
        assert_eq!(week.plan_for(Weekday::Fri), Some(plan));
        assert_eq!(week.plan_for(Weekday::Sat), None);
        assert_eq!(week.plan_for(Weekday::Sun), None);
    }
}
