//! Read-only configuration consumed by the engine.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use timeledger_shared::types::{
    AbsenceTypeId, CalculationRuleId, DayPlanId, EmployeeId, EmploymentTypeId, TariffId,
};

use crate::absence::AbsenceType;
use crate::day_plan::{DayAssignment, DayPlan};
use crate::employee::Employee;
use crate::rules::CalculationRule;
use crate::tariff::Tariff;
use crate::vacation::VacationCalculationGroup;

/// Lookups for configuration owned by administrative tooling.
///
/// Implemented by the host application. A `None` answer is never an error
/// for the engine; it falls back to documented defaults.
pub trait ConfigSource: Send + Sync {
    /// Employee attributes.
    fn employee(&self, id: EmployeeId) -> Option<Employee>;

    /// A tariff.
    fn tariff(&self, id: TariffId) -> Option<Tariff>;

    /// A day plan.
    fn day_plan(&self, id: DayPlanId) -> Option<DayPlan>;

    /// Employee-specific plan for a date, overriding the week plan.
    fn day_assignment(&self, employee_id: EmployeeId, date: NaiveDate) -> Option<DayAssignment>;

    /// Whether `date` is a public holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;

    /// A calculation rule.
    fn calculation_rule(&self, id: CalculationRuleId) -> Option<CalculationRule>;

    /// An absence type.
    fn absence_type(&self, id: AbsenceTypeId) -> Option<AbsenceType>;

    /// The vacation calculation group of an employment type.
    fn vacation_group(&self, employment_type_id: EmploymentTypeId)
    -> Option<VacationCalculationGroup>;
}

/// A [`ConfigSource`] holding everything in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigSource {
    employees: HashMap<EmployeeId, Employee>,
    tariffs: HashMap<TariffId, Tariff>,
    day_plans: HashMap<DayPlanId, DayPlan>,
    assignments: HashMap<(EmployeeId, NaiveDate), DayAssignment>,
    holidays: HashSet<NaiveDate>,
    rules: HashMap<CalculationRuleId, CalculationRule>,
    absence_types: HashMap<AbsenceTypeId, AbsenceType>,
    vacation_groups: HashMap<EmploymentTypeId, VacationCalculationGroup>,
}

impl InMemoryConfigSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee.
    #[must_use]
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.insert(employee.id, employee);
        self
    }

    /// Adds a tariff.
    #[must_use]
    pub fn with_tariff(mut self, tariff: Tariff) -> Self {
        self.tariffs.insert(tariff.id, tariff);
        self
    }

    /// Adds a day plan.
    #[must_use]
    pub fn with_day_plan(mut self, plan: DayPlan) -> Self {
        self.day_plans.insert(plan.id, plan);
        self
    }

    /// Assigns a plan or a free day to one employee and date.
    #[must_use]
    pub fn with_assignment(
        mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
        assignment: DayAssignment,
    ) -> Self {
        self.assignments.insert((employee_id, date), assignment);
        self
    }

    /// Marks a date as a public holiday.
    #[must_use]
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Adds a calculation rule.
    #[must_use]
    pub fn with_rule(mut self, rule: CalculationRule) -> Self {
        self.rules.insert(rule.id, rule);
        self
    }

    /// Adds an absence type.
    #[must_use]
    pub fn with_absence_type(mut self, absence_type: AbsenceType) -> Self {
        self.absence_types.insert(absence_type.id, absence_type);
        self
    }

    /// Links a vacation group to an employment type.
    #[must_use]
    pub fn with_vacation_group(
        mut self,
        employment_type_id: EmploymentTypeId,
        group: VacationCalculationGroup,
    ) -> Self {
        self.vacation_groups.insert(employment_type_id, group);
        self
    }
}

impl ConfigSource for InMemoryConfigSource {
    fn employee(&self, id: EmployeeId) -> Option<Employee> {
        self.employees.get(&id).cloned()
    }

    fn tariff(&self, id: TariffId) -> Option<Tariff> {
        self.tariffs.get(&id).cloned()
    }

    fn day_plan(&self, id: DayPlanId) -> Option<DayPlan> {
        self.day_plans.get(&id).cloned()
    }

    fn day_assignment(&self, employee_id: EmployeeId, date: NaiveDate) -> Option<DayAssignment> {
        self.assignments.get(&(employee_id, date)).copied()
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    fn calculation_rule(&self, id: CalculationRuleId) -> Option<CalculationRule> {
        self.rules.get(&id).cloned()
    }

    fn absence_type(&self, id: AbsenceTypeId) -> Option<AbsenceType> {
        self.absence_types.get(&id).cloned()
    }

    fn vacation_group(
        &self,
        employment_type_id: EmploymentTypeId,
    ) -> Option<VacationCalculationGroup> {
        self.vacation_groups.get(&employment_type_id).cloned()
    }
}
