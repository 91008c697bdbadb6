//! Leave reference data, requests, and per-day leave records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A leave type (reference data), e.g. annual, sick, or unpaid leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier for the leave type.
    pub id: Uuid,
    /// Human-readable name (e.g., "Annual Leave").
    pub name: String,
    /// Whether days of this type are paid. Unpaid types feed salary proration.
    pub is_paid: bool,
    /// Whether requests of this type need an approver before they count.
    pub requires_approval: bool,
}

/// Lifecycle status of a leave request.
///
/// A request starts as `Pending` (or directly as `Approved` when an admin
/// records leave on an employee's behalf) and moves to exactly one terminal
/// status. Only `Approved` requests count toward leave usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; per-day leave records have been (or are being) materialized.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Withdrawn by the employee or an admin.
    Cancelled,
}

impl LeaveStatus {
    /// Returns true when this status is terminal (no further meaningful moves).
    pub fn is_terminal(self) -> bool {
        self != LeaveStatus::Pending
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A leave request covering an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: Uuid,
    /// The leave type requested, referencing [`LeaveType::id`].
    pub leave_type_id: Uuid,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of days requested. Fractional values represent half-days.
    pub days_requested: Decimal,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// The approver who decided the request, if decided.
    pub approved_by: Option<Uuid>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last modified.
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Number of calendar days in the inclusive request range.
    ///
    /// Used by admin tooling when a request is recorded without a
    /// precomputed `days_requested`.
    ///
    /// # Example
    ///
    /// ```
    /// use accrual_engine::models::{LeaveRequest, LeaveStatus};
    /// use chrono::{NaiveDate, Utc};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let request = LeaveRequest {
    ///     id: Uuid::new_v4(),
    ///     employee_id: Uuid::new_v4(),
    ///     leave_type_id: Uuid::new_v4(),
    ///     start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
    ///     days_requested: Decimal::from(3),
    ///     status: LeaveStatus::Pending,
    ///     approved_by: None,
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// assert_eq!(request.day_count(), 3);
    /// ```
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether the request's inclusive range overlaps `[start, end)`.
    ///
    /// The upper bound is exclusive, matching how probation windows are
    /// expressed (the window ends the day probation finishes).
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && self.end_date >= start
    }
}

/// One materialized day of approved leave.
///
/// Approving a request writes one of these per calendar day in the request
/// range; the balance aggregator and the payroll generator's unpaid-day
/// figure are both derived from these rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveDayRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The request this day belongs to.
    pub request_id: Uuid,
    /// The employee on leave.
    pub employee_id: Uuid,
    /// The leave type of the originating request.
    pub leave_type_id: Uuid,
    /// The calendar day of leave.
    pub date: NaiveDate,
    /// Whether this day is paid. Unpaid days are prorated out of salary.
    pub is_paid: bool,
}
