//! Vacation periods and months of employment.

use chrono::{Datelike, Months, NaiveDate};

use super::error::VacationError;
use super::types::{VacationBasis, VacationPeriod};
use crate::employee::Employee;

/// The vacation period for `year`.
///
/// # Errors
///
/// Returns `VacationError::YearOutOfRange` if the dates cannot be
/// represented.
pub fn vacation_period(
    basis: VacationBasis,
    entry_date: NaiveDate,
    year: i32,
) -> Result<VacationPeriod, VacationError> {
    let out_of_range = || VacationError::YearOutOfRange(year);
    match basis {
        VacationBasis::CalendarYear => Ok(VacationPeriod {
            start: NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(out_of_range)?,
        }),
        VacationBasis::EntryDate => {
            let start = anniversary(entry_date, year).ok_or_else(out_of_range)?;
            let end = year
                .checked_add(1)
                .and_then(|next| anniversary(entry_date, next))
                .and_then(|next| next.pred_opt())
                .ok_or_else(out_of_range)?;
            Ok(VacationPeriod { start, end })
        }
    }
}

/// The entry anniversary in `year`; Feb 29 falls on Feb 28 in common years.
fn anniversary(entry_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, entry_date.month(), entry_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, entry_date.month(), entry_date.day() - 1))
}

/// Number of the period's twelve monthly slices that overlap the employment
/// by at least one day.
#[must_use]
pub fn months_employed(period: &VacationPeriod, employee: &Employee) -> u32 {
    (0u32..12)
        .filter(|&index| {
            let Some(slice_start) = period.start.checked_add_months(Months::new(index)) else {
                return false;
            };
            let slice_end = if index == 11 {
                period.end
            } else {
                period
                    .start
                    .checked_add_months(Months::new(index + 1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(period.end)
            };
            employee.entry_date <= slice_end
                && employee.exit_date.is_none_or(|exit| exit >= slice_start)
        })
        .count()
        .try_into()
        .unwrap_or(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_year_period() {
        let period = vacation_period(VacationBasis::CalendarYear, date(2019, 5, 17), 2026).unwrap();
        assert_eq!(period.start, date(2026, 1, 1));
        assert_eq!(period.end, date(2026, 12, 31));
    }

    #[test]
    fn test_entry_date_period() {
        let period = vacation_period(VacationBasis::EntryDate, date(2019, 5, 17), 2026).unwrap();
        assert_eq!(period.start, date(2026, 5, 17));
        assert_eq!(period.end, date(2027, 5, 16));
    }

    #[test]
    fn test_leap_day_entry() {
        let entry = date(2020, 2, 29);

        let common = vacation_period(VacationBasis::EntryDate, entry, 2026).unwrap();
        assert_eq!(common.start, date(2026, 2, 28));
        assert_eq!(common.end, date(2027, 2, 27));

        let before_leap = vacation_period(VacationBasis::EntryDate, entry, 2027).unwrap();
        assert_eq!(before_leap.end, date(2028, 2, 28));

        let leap = vacation_period(VacationBasis::EntryDate, entry, 2028).unwrap();
        assert_eq!(leap.start, date(2028, 2, 29));
    }

    #[rstest]
    // Employed all year.
    #[case(date(2019, 1, 1), None, 12)]
    // Entry on the first of March.
    #[case(date(2026, 3, 1), None, 10)]
    // Entry mid-month counts the whole month.
    #[case(date(2026, 3, 31), None, 10)]
    // Exit mid-year.
    #[case(date(2019, 1, 1), Some(date(2026, 6, 1)), 6)]
    // Entry after the period.
    #[case(date(2027, 1, 1), None, 0)]
    // Exit before the period.
    #[case(date(2019, 1, 1), Some(date(2025, 12, 31)), 0)]
    fn test_months_employed(
        #[case] entry: NaiveDate,
        #[case] exit: Option<NaiveDate>,
        #[case] expected: u32,
    ) {
        let mut employee = Employee::new(entry);
        employee.exit_date = exit;
        let period = vacation_period(VacationBasis::CalendarYear, entry, 2026).unwrap();
        assert_eq!(months_employed(&period, &employee), expected);
    }
}
