//! Vacation entitlement and balance.

pub mod balance;
pub mod entitlement;
pub mod error;
pub mod period;
pub mod types;


pub use balance::VacationBalance;
pub use entitlement::{VacationEntitlementCalculator, VacationInput, round_to_half};
pub use error::VacationError;
pub use period::{months_employed, vacation_period};
pub use types::{
    BonusLine, SpecialCalculationType, VacationBasis, VacationCalculationGroup,
    VacationEntitlement, VacationPeriod, VacationSpecialCalculation,
};
