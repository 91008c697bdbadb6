//! Leave balance aggregation.
//!
//! Computes the derived [`LeaveBalance`] rows for an employee and year from
//! approved leave requests and the resolved policy caps. Balances are a pure
//! function of those inputs; they are recomputed on demand and never edited
//! in place, so the `remaining = allocated - used` invariant always holds.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::calculation::policy::PolicyLookup;
use crate::calculation::probation::probation_end;
use crate::models::{Employee, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType};

/// Which slice of the year a balance covers.
///
/// Under [`BalanceView::Month`] the `used` figures sum only approved
/// requests whose start date falls in that month, while the allocation
/// stays the full-year cap. A month view therefore shows a different usage
/// percentage than the year view for the same data; both views are part of
/// the reporting contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceView {
    /// The whole calendar year.
    Year,
    /// A single month (1-12) of the year.
    Month(u32),
}

/// Aggregates the balance for one employee and leave type.
///
/// Only `Approved` requests for this employee and leave type whose start
/// date falls in `year` (and in the view's month, if any) are counted. A
/// request whose date range overlaps the employee's probation window goes
/// into the probation bucket; everything else goes into the confirmed
/// bucket. Remaining figures are not floored at zero: over-allocation
/// shows up as a negative remaining for admins to act on.
pub fn aggregate_balance(
    employee: &Employee,
    leave_type: &LeaveType,
    lookup: &PolicyLookup,
    requests: &[LeaveRequest],
    year: i32,
    view: BalanceView,
) -> LeaveBalance {
    let window_start = employee.join_date;
    let window_end = probation_end(employee.join_date, employee.probation_months);

    let mut used = Decimal::ZERO;
    let mut probation_used = Decimal::ZERO;

    for request in requests {
        if request.employee_id != employee.id
            || request.leave_type_id != leave_type.id
            || request.status != LeaveStatus::Approved
            || request.start_date.year() != year
        {
            continue;
        }
        if let BalanceView::Month(month) = view
            && request.start_date.month() != month
        {
            continue;
        }

        if request.overlaps(window_start, window_end) {
            probation_used += request.days_requested;
        } else {
            used += request.days_requested;
        }
    }

    let allocated = lookup.max_days_per_year();
    let probation_allocated = lookup.probation_max_days();

    LeaveBalance {
        employee_id: employee.id,
        leave_type_id: Some(leave_type.id),
        leave_type_name: leave_type.name.clone(),
        year,
        allocated_days: allocated,
        used_days: used,
        remaining_days: allocated - used,
        probation_allocated_days: probation_allocated,
        probation_used_days: probation_used,
        probation_remaining_days: probation_allocated - probation_used,
    }
}

/// Aggregates all balances for one employee.
///
/// Produces one row per leave type configured for the employee's category.
/// An employee with no configured leave types still gets one placeholder
/// row so that every active employee appears in roll-ups.
pub fn aggregate_employee_balances(
    employee: &Employee,
    resolved: &[(LeaveType, PolicyLookup)],
    requests: &[LeaveRequest],
    year: i32,
    view: BalanceView,
) -> Vec<LeaveBalance> {
    if resolved.is_empty() {
        return vec![LeaveBalance::placeholder(employee.id, year)];
    }

    resolved
        .iter()
        .map(|(leave_type, lookup)| {
            aggregate_balance(employee, leave_type, lookup, requests, year, view)
        })
        .collect()
}
