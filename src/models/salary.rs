//! Salary records and generated salary payments.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// A base-salary record with an effective date range.
///
/// At most one record per employee may be active at any point in time;
/// [`active_salary_for`] rejects overlapping active rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee this salary belongs to.
    pub employee_id: Uuid,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// ISO currency code (e.g., "BDT", "USD").
    pub currency: String,
    /// First date this salary applies (inclusive).
    pub effective_from: NaiveDate,
    /// Last date this salary applies (inclusive), open-ended when `None`.
    pub effective_to: Option<NaiveDate>,
    /// Whether this record is active.
    pub is_active: bool,
}

impl SalaryRecord {
    /// Whether this record's effective range covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date <= to)
    }
}

/// Picks the active salary record covering `date` from an employee's records.
///
/// Returns `Ok(None)` when no active record covers the date, and a
/// `Validation` error when more than one does, since overlapping active
/// ranges violate the ledger's integrity rule.
pub fn active_salary_for(
    records: &[SalaryRecord],
    date: NaiveDate,
) -> EngineResult<Option<&SalaryRecord>> {
    let mut covering = records.iter().filter(|r| r.is_active && r.covers(date));

    let first = covering.next();
    if let Some(second) = covering.next() {
        return Err(EngineError::Validation {
            field: "salary_records".to_string(),
            message: format!(
                "employee {} has overlapping active salary records covering {}",
                second.employee_id, date
            ),
        });
    }
    Ok(first)
}

/// A generated monthly salary payment.
///
/// Exactly one payment exists per (employee, payment month) under normal
/// operation; the payroll generator upserts by that key. `net_salary` is
/// not floored at zero so a deduction exceeding the base salary stays
/// visible to operators as a negative net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryPayment {
    /// Unique identifier for the payment.
    pub id: Uuid,
    /// The employee being paid.
    pub employee_id: Uuid,
    /// The payment month, normalized to the first of the month.
    pub payment_month: NaiveDate,
    /// Snapshot of the base salary used for this payment.
    pub base_salary: Decimal,
    /// Unpaid leave days deducted, possibly fractional.
    pub unpaid_leave_days: Decimal,
    /// Deduction percentage applied to unpaid days (0-100).
    pub deduction_percentage: Decimal,
    /// Currency amount deducted for unpaid leave, rounded to 2 dp.
    pub leave_deductions: Decimal,
    /// Manual cash advance deducted this month, rounded to 2 dp.
    pub advance_deductions: Decimal,
    /// Free-text reason for the advance, when one was applied.
    pub advance_reason: Option<String>,
    /// `base_salary - leave_deductions - advance_deductions`, rounded to 2 dp.
    pub net_salary: Decimal,
    /// Whether the payment has been disbursed.
    pub is_paid: bool,
    /// When the payment was disbursed.
    pub paid_at: Option<DateTime<Utc>>,
    /// When the payroll generator produced or last updated this row.
    pub generated_at: DateTime<Utc>,
}

impl SalaryPayment {
    /// Marks the payment as disbursed at `paid_at`.
    ///
    /// Disbursement state survives payroll regeneration: re-running the
    /// generator for the month recomputes amounts but keeps these flags.
    pub fn mark_paid(&mut self, paid_at: DateTime<Utc>) {
        self.is_paid = true;
        self.paid_at = Some(paid_at);
    }
}
