//! Daily rate and salary proration.
//!
//! Converts a monthly base salary into a per-day rate using the actual
//! calendar day count of the target month, and turns unpaid leave days into
//! a currency deduction. The divisor is always the true month length (28-31,
//! leap aware); a fixed /30 divisor would silently shift every employee's
//! daily rate depending on the month.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Number of calendar days in a month, leap-year aware.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2025, 2).unwrap(), 28);
/// assert_eq!(days_in_month(2025, 10).unwrap(), 31);
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok((next - first).num_days() as u32)
}

/// The first day of a month, validating the (year, month) pair.
pub fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::Validation {
        field: "month".to_string(),
        message: format!("{year}-{month} is not a valid calendar month"),
    })
}

/// The per-day salary rate for a month: `base_salary / days_in_month`.
///
/// The rate keeps full decimal precision; rounding to currency happens
/// only when a payment is persisted.
///
/// # Errors
///
/// `Validation` when `base_salary` is not positive or the month is invalid.
pub fn daily_rate(base_salary: Decimal, year: i32, month: u32) -> EngineResult<Decimal> {
    if base_salary <= Decimal::ZERO {
        return Err(EngineError::Validation {
            field: "base_salary".to_string(),
            message: format!("must be positive, got {base_salary}"),
        });
    }
    let days = days_in_month(year, month)?;
    Ok(base_salary / Decimal::from(days))
}

/// Currency deduction for unpaid leave days.
///
/// `daily_rate * unpaid_days * (deduction_percentage / 100)`. The
/// percentage is operator-entered per batch (100 means a full day's pay is
/// withheld per unpaid day), so out-of-range values are rejected rather
/// than clamped. Fractional `unpaid_days` represent half-day leave.
///
/// # Errors
///
/// `Validation` when `unpaid_days` is negative or `deduction_percentage`
/// is outside `[0, 100]`.
pub fn leave_deduction(
    daily_rate: Decimal,
    unpaid_days: Decimal,
    deduction_percentage: Decimal,
) -> EngineResult<Decimal> {
    if unpaid_days < Decimal::ZERO {
        return Err(EngineError::Validation {
            field: "unpaid_days".to_string(),
            message: format!("must not be negative, got {unpaid_days}"),
        });
    }
    validate_deduction_percentage(deduction_percentage)?;
    Ok(daily_rate * unpaid_days * (deduction_percentage / Decimal::from(100)))
}

/// Rejects a deduction percentage outside `[0, 100]`.
pub fn validate_deduction_percentage(deduction_percentage: Decimal) -> EngineResult<()> {
    if deduction_percentage < Decimal::ZERO || deduction_percentage > Decimal::from(100) {
        return Err(EngineError::Validation {
            field: "deduction_percentage".to_string(),
            message: format!("must be between 0 and 100, got {deduction_percentage}"),
        });
    }
    Ok(())
}
