//! Recalculation service: resolves configuration, runs the calculators,
//! and writes results.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use rust_decimal::Decimal;
use timeledger_shared::EngineConfig;
use timeledger_shared::types::EmployeeId;

use super::error::EngineError;
use super::source::ConfigSource;
use crate::absence::AbsenceDay;
use crate::accounts::{AccountPoster, PostingInstruction};
use crate::booking::Booking;
use crate::daily::{DailyCalculator, DailyInput, DailyValue};
use crate::day_plan::{DayPlan, DayPlanResolver, ResolvedDay};
use crate::employee::Employee;
use crate::monthly::{
    MonthStatus, MonthlyEvaluator, MonthlyInput, MonthlyValue, month_bounds, previous_month,
};
use crate::store::ResultStore;
use crate::tariff::Tariff;
use crate::vacation::{
    VacationBalance, VacationEntitlement, VacationEntitlementCalculator, VacationInput,
};

/// One (employee, date) unit of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayUnit {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The date.
    pub date: NaiveDate,
    /// All bookings of the date.
    pub bookings: Vec<Booking>,
    /// Absence recorded for the date.
    pub absence: Option<AbsenceDay>,
}

/// Entry point for recomputation triggers.
///
/// Every operation is a pure calculation followed by upserts on natural
/// keys, so repeating or racing the same unit converges on one result.
pub struct RecalculationService<C, S> {
    config: EngineConfig,
    source: Arc<C>,
    store: Arc<S>,
    pool: Option<rayon::ThreadPool>,
}

impl<C, S> RecalculationService<C, S>
where
    C: ConfigSource,
    S: ResultStore,
{
    /// Creates a service.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ThreadPool` if a dedicated batch pool was
    /// configured and cannot be built.
    pub fn new(config: EngineConfig, source: Arc<C>, store: Arc<S>) -> Result<Self, EngineError> {
        let pool = config
            .batch_threads
            .map(|threads| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|index| format!("timeledger-batch-{index}"))
                    .build()
                    .map_err(|err| EngineError::ThreadPool(err.to_string()))
            })
            .transpose()?;

        Ok(Self {
            config,
            source,
            store,
            pool,
        })
    }

    /// The result store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Recalculates one employee's day and writes the daily value and its
    /// account postings.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee does not exist
    /// - `MonthClosed` if the date's month is closed
    /// - `Store` if a write fails
    #[tracing::instrument(skip_all, fields(employee_id = %employee_id, %date))]
    pub fn recalculate_day(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        bookings: &[Booking],
        absence: Option<&AbsenceDay>,
    ) -> Result<DailyValue, EngineError> {
        let employee = self.employee(employee_id)?;
        self.ensure_open(employee_id, date.year(), date.month())?;

        let absence = absence.filter(|absence| {
            let same_day = absence.date == date;
            if !same_day {
                tracing::warn!(absence_date = %absence.date, "Absence for another date ignored");
            }
            same_day
        });
        let tariff = self.tariff_of(&employee);
        let day = DayPlanResolver::resolve(
            &employee,
            tariff.as_ref(),
            date,
            self.source.is_holiday(date),
            self.source.day_assignment(employee_id, date),
            |plan_id| self.source.day_plan(plan_id),
        );
        let fallback_target_minutes = tariff
            .as_ref()
            .and_then(|t| t.daily_target_minutes(self.config.work_days_per_week));

        let outcome = DailyCalculator::calculate(&DailyInput {
            employee_id,
            date,
            bookings,
            day: &day,
            absence,
            fallback_target_minutes,
        });

        let mut postings = outcome.postings;
        if let (ResolvedDay::Working(plan), Some(absence)) = (&day, absence) {
            postings.extend(self.absence_posting(
                plan,
                absence,
                fallback_target_minutes,
                employee_id,
            ));
        }

        self.store.upsert_daily_value(outcome.value.clone())?;
        AccountPoster::post_day(self.store.as_ref(), employee_id, date, &postings)?;

        tracing::debug!(
            net = outcome.value.net_minutes,
            postings = postings.len(),
            "Day recalculated"
        );

        Ok(outcome.value)
    }

    /// Recalculates many days in parallel.
    ///
    /// Units are independent; one failing unit does not affect the others.
    /// Results are returned in input order.
    pub fn recalculate_days(&self, units: &[DayUnit]) -> Vec<Result<DailyValue, EngineError>> {
        let run = || {
            units
                .par_iter()
                .map(|unit| {
                    self.recalculate_day(
                        unit.employee_id,
                        unit.date,
                        &unit.bookings,
                        unit.absence.as_ref(),
                    )
                })
                .collect::<Vec<_>>()
        };

        let results = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(total = units.len(), failed, "Batch recalculation had failures");
        }
        results
    }

    /// Evaluates a month from the stored daily values and writes it.
    ///
    /// The starting carryover is the stored ending carryover of the previous
    /// month, or 0 when there is none. Later months are not touched.
    ///
    /// # Errors
    ///
    /// - `InvalidMonth` for an invalid year/month
    /// - `EmployeeNotFound` if the employee does not exist
    /// - `MonthClosed` if the month is closed
    /// - `Store` if a read or write fails
    #[tracing::instrument(skip_all, fields(employee_id = %employee_id, year = year, month = month))]
    pub fn recalculate_month(
        &self,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
        absences: &[AbsenceDay],
    ) -> Result<MonthlyValue, EngineError> {
        let (first, last) =
            month_bounds(year, month).ok_or(EngineError::InvalidMonth { year, month })?;
        let employee = self.employee(employee_id)?;
        self.ensure_open(employee_id, year, month)?;

        let (previous_year, previous_month) = previous_month(year, month);
        let carryover_start = self
            .store
            .monthly_value(employee_id, previous_year, previous_month)?
            .map_or(0, |previous| previous.carryover_end);

        let tariff = self.tariff_of(&employee);
        let daily_values = self.store.daily_values_between(employee_id, first, last)?;

        let value = MonthlyEvaluator::evaluate(
            &MonthlyInput {
                employee_id,
                year,
                month,
                daily_values: &daily_values,
                absences,
                carryover_start,
                tariff_resolved: tariff.is_some(),
                rules: tariff.as_ref().and_then(|t| t.evaluation),
            },
            |type_id| self.source.absence_type(type_id).map(|t| t.category),
        );

        self.store.upsert_monthly_value(value.clone())?;

        tracing::debug!(
            carryover_start = value.carryover_start,
            carryover_end = value.carryover_end,
            "Month recalculated"
        );

        Ok(value)
    }

    /// Closes an evaluated month.
    ///
    /// # Errors
    ///
    /// Returns `MonthNotEvaluated` if no value is stored, or `Store` on
    /// storage failure.
    pub fn close_month(
        &self,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<MonthlyValue, EngineError> {
        self.set_month_status(employee_id, year, month, MonthStatus::Closed)
    }

    /// Reopens a closed month.
    ///
    /// # Errors
    ///
    /// Returns `MonthNotEvaluated` if no value is stored, or `Store` on
    /// storage failure.
    pub fn reopen_month(
        &self,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<MonthlyValue, EngineError> {
        self.set_month_status(employee_id, year, month, MonthStatus::Open)
    }

    /// Computes the vacation entitlement for a year without persisting it.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or `Vacation`.
    pub fn preview_vacation(
        &self,
        employee_id: EmployeeId,
        year: i32,
    ) -> Result<VacationEntitlement, EngineError> {
        let employee = self.employee(employee_id)?;
        let tariff = self.tariff_of(&employee);
        let group = employee
            .employment_type_id
            .and_then(|id| self.source.vacation_group(id));

        Ok(VacationEntitlementCalculator::calculate(&VacationInput {
            employee: &employee,
            year,
            tariff_days: tariff.as_ref().and_then(|t| t.annual_vacation_days),
            standard_weekly_hours: tariff.as_ref().and_then(|t| t.weekly_target_hours),
            group: group.as_ref(),
        })?)
    }

    /// Computes the remaining vacation days for a year without persisting
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or `Vacation`.
    pub fn preview_vacation_balance(
        &self,
        employee_id: EmployeeId,
        year: i32,
        carryover_days: Decimal,
        absences: &[AbsenceDay],
    ) -> Result<VacationBalance, EngineError> {
        let entitlement = self.preview_vacation(employee_id, year)?;
        let taken = VacationBalance::taken_in(&entitlement.period, absences, |type_id| {
            self.source.absence_type(type_id).map(|t| t.category)
        });
        Ok(VacationBalance::new(&entitlement, carryover_days, taken))
    }

    fn employee(&self, employee_id: EmployeeId) -> Result<Employee, EngineError> {
        self.source
            .employee(employee_id)
            .ok_or(EngineError::EmployeeNotFound(employee_id))
    }

    fn tariff_of(&self, employee: &Employee) -> Option<Tariff> {
        let tariff_id = employee.tariff_id?;
        let tariff = self.source.tariff(tariff_id);
        if tariff.is_none() {
            tracing::warn!(
                employee_id = %employee.id,
                tariff_id = %tariff_id,
                "Tariff could not be loaded"
            );
        }
        tariff
    }

    fn ensure_open(
        &self,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<(), EngineError> {
        let closed = self
            .store
            .monthly_value(employee_id, year, month)?
            .is_some_and(|value| value.is_closed());
        if closed {
            return Err(EngineError::MonthClosed {
                employee_id,
                year,
                month,
            });
        }
        Ok(())
    }

    fn absence_posting(
        &self,
        plan: &DayPlan,
        absence: &AbsenceDay,
        fallback_target_minutes: Option<i32>,
        employee_id: EmployeeId,
    ) -> Option<PostingInstruction> {
        if !absence.is_approved() {
            return None;
        }
        let absence_type = self.source.absence_type(absence.absence_type_id);
        let rule = absence_type
            .as_ref()
            .and_then(|t| t.calculation_rule_id)
            .and_then(|rule_id| self.source.calculation_rule(rule_id));

        match (absence_type, rule) {
            (None, _) => {
                tracing::warn!(
                    employee_id = %employee_id,
                    absence_type_id = %absence.absence_type_id,
                    "Absence type could not be loaded, no absence posting"
                );
                None
            }
            (Some(_), None) => None,
            (Some(_), Some(rule)) => {
                let target = DailyCalculator::planned_target(plan, fallback_target_minutes);
                AccountPoster::absence_instruction(absence, &rule, target)
            }
        }
    }

    fn set_month_status(
        &self,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
        status: MonthStatus,
    ) -> Result<MonthlyValue, EngineError> {
        let mut value = self.store.monthly_value(employee_id, year, month)?.ok_or(
            EngineError::MonthNotEvaluated {
                employee_id,
                year,
                month,
            },
        )?;
        value.status = status;
        self.store.upsert_monthly_value(value.clone())?;
        tracing::info!(employee_id = %employee_id, year, month, ?status, "Month status changed");
        Ok(value)
    }
}
