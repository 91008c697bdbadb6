//! Probation window classification.
//!
//! Decides whether a reference date falls inside an employee's probation
//! window, which in turn selects the probation-tier or confirmed-tier leave
//! allocation.

use chrono::{Days, NaiveDate};

/// Days per probation month.
///
/// The window is `probation_months * 30` days, not true calendar months.
/// This matches the legacy HR system's arithmetic and shifts the tier
/// boundary by a few days in longer months; correcting it would move
/// requests near the boundary between tiers, so the approximation is kept.
pub const PROBATION_MONTH_DAYS: u64 = 30;

/// The first day on which the employee is no longer on probation.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::probation_end;
/// use chrono::NaiveDate;
///
/// let join = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// // 3 months x 30 days, not calendar months: ends 2025-04-01, not 2025-04-02.
/// assert_eq!(probation_end(join, 3), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
/// ```
pub fn probation_end(join_date: NaiveDate, probation_months: u32) -> NaiveDate {
    join_date
        .checked_add_days(Days::new(u64::from(probation_months) * PROBATION_MONTH_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Whether `reference_date` falls inside the probation window.
///
/// Total over valid dates; the boundary day itself counts as confirmed.
/// The classification is monotonic in the reference date: true for every
/// date before the boundary, false from the boundary on.
pub fn is_on_probation(
    join_date: NaiveDate,
    probation_months: u32,
    reference_date: NaiveDate,
) -> bool {
    reference_date < probation_end(join_date, probation_months)
}
