//! Derived leave balance rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A derived leave balance for one employee, leave type, and year.
///
/// Balances are a materialized view over approved leave requests and the
/// resolved leave policy. They are always recomputed from those inputs,
/// never hand-edited, so `remaining = allocated - used` holds exactly for
/// both tiers. Remaining figures are deliberately not floored at zero:
/// a negative remaining signals over-allocation that admins need to see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this balance belongs to.
    pub employee_id: Uuid,
    /// The leave type, or `None` for the placeholder row of an employee
    /// with no configured leave types.
    pub leave_type_id: Option<Uuid>,
    /// The leave type name; `"none"` for the placeholder row.
    pub leave_type_name: String,
    /// The calendar year this balance covers.
    pub year: i32,
    /// Full-year allocation for the confirmed tier.
    pub allocated_days: Decimal,
    /// Approved days consumed in the confirmed tier.
    pub used_days: Decimal,
    /// `allocated_days - used_days`, negative when over-allocated.
    pub remaining_days: Decimal,
    /// Allocation for the probation tier.
    pub probation_allocated_days: Decimal,
    /// Approved days consumed while inside the probation window.
    pub probation_used_days: Decimal,
    /// `probation_allocated_days - probation_used_days`, may be negative.
    pub probation_remaining_days: Decimal,
}

impl LeaveBalance {
    /// The placeholder balance for an employee with no configured leave types.
    ///
    /// Every active employee appears in roll-ups, so an employee whose
    /// category has no leave policies still gets one all-zero row.
    pub fn placeholder(employee_id: Uuid, year: i32) -> Self {
        Self {
            employee_id,
            leave_type_id: None,
            leave_type_name: "none".to_string(),
            year,
            allocated_days: Decimal::ZERO,
            used_days: Decimal::ZERO,
            remaining_days: Decimal::ZERO,
            probation_allocated_days: Decimal::ZERO,
            probation_used_days: Decimal::ZERO,
            probation_remaining_days: Decimal::ZERO,
        }
    }

    /// Confirmed-tier usage as a percentage of the allocation.
    ///
    /// Returns `None` when the allocation is zero. Under a month-filtered
    /// view the numerator shrinks while the denominator stays the full-year
    /// cap, so this figure differs between year and month views.
    pub fn usage_percentage(&self) -> Option<Decimal> {
        if self.allocated_days.is_zero() {
            None
        } else {
            Some(self.used_days / self.allocated_days * Decimal::from(100))
        }
    }
}
