//! Batch payroll generation.
//!
//! For a target month and a chosen set of employees, produces or updates
//! one [`SalaryPayment`] per employee. The generator holds no state between
//! invocations; everything persisted lives in the payment ledger, keyed by
//! (employee, payment month), which is what makes re-running a month safe.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::proration::{
    daily_rate, first_of_month, leave_deduction, validate_deduction_percentage,
};
use crate::error::{EngineError, EngineResult};
use crate::ledger::{PaymentAction, PaymentLedger};
use crate::models::{Employee, SalaryPayment, SalaryRecord};

/// Manual per-employee adjustments threaded into a payroll run.
#[derive(Debug, Clone, Default)]
pub struct EmployeeAdjustment {
    /// Overrides the system-calculated unpaid-day figure when supplied.
    pub unpaid_days_override: Option<Decimal>,
    /// Ad hoc cash advance deducted from this month's payment.
    pub advance_amount: Option<Decimal>,
    /// Free-text reason recorded alongside the advance.
    pub advance_reason: Option<String>,
}

/// Configuration for one payroll run.
///
/// An explicit value object rather than ambient state, so batches are
/// reproducible: the same config and inputs always produce the same
/// payments.
#[derive(Debug, Clone)]
pub struct PayrollRunConfig {
    /// The payment month, normalized to the first of the month.
    pub month: NaiveDate,
    /// Percentage of a day's pay withheld per unpaid day (0-100).
    pub deduction_percentage: Decimal,
    /// Manual adjustments keyed by employee id.
    pub adjustments: HashMap<Uuid, EmployeeAdjustment>,
}

impl PayrollRunConfig {
    /// Creates a run configuration for a target month.
    ///
    /// The deduction percentage defaults to 100 ("withhold a full day's
    /// pay per unpaid day").
    ///
    /// # Errors
    ///
    /// `Validation` when the (year, month) pair is not a real month.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        Ok(Self {
            month: first_of_month(year, month)?,
            deduction_percentage: Decimal::from(100),
            adjustments: HashMap::new(),
        })
    }

    /// Sets the global deduction percentage for the batch.
    ///
    /// # Errors
    ///
    /// `Validation` when the percentage is outside `[0, 100]`; operator
    /// input is rejected, never silently clamped.
    pub fn with_deduction_percentage(mut self, percentage: Decimal) -> EngineResult<Self> {
        validate_deduction_percentage(percentage)?;
        self.deduction_percentage = percentage;
        Ok(self)
    }

    /// Adds a manual adjustment for one employee.
    pub fn with_adjustment(mut self, employee_id: Uuid, adjustment: EmployeeAdjustment) -> Self {
        self.adjustments.insert(employee_id, adjustment);
        self
    }
}

/// Per-employee input assembled by the caller at the system's edges.
#[derive(Debug, Clone)]
pub struct PayrollEmployeeInput {
    /// The employee being paid.
    pub employee: Employee,
    /// The employee's active salary record, if one covers the month.
    pub salary: Option<SalaryRecord>,
    /// System-calculated unpaid leave days for the month.
    pub system_unpaid_days: Decimal,
}

/// A successfully generated or updated payment.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// The employee the payment belongs to.
    pub employee_id: Uuid,
    /// Whether the ledger row was created or updated in place.
    pub action: PaymentAction,
    /// The payment as persisted.
    pub payment: SalaryPayment,
}

/// A per-employee failure inside a batch.
#[derive(Debug)]
pub struct PaymentFailure {
    /// The employee whose processing failed.
    pub employee_id: Uuid,
    /// What went wrong.
    pub error: EngineError,
}

/// The per-employee success/failure report for one payroll run.
#[derive(Debug)]
pub struct PayrollRunReport {
    /// The payment month the run covered.
    pub month: NaiveDate,
    /// Payments generated or updated, in input order.
    pub succeeded: Vec<PaymentOutcome>,
    /// Employees whose processing failed, in input order.
    pub failed: Vec<PaymentFailure>,
}

impl PayrollRunReport {
    /// Whether every employee in the batch was processed.
    pub fn is_fully_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generates payments for a batch of employees and one target month.
///
/// Each employee is processed independently: a failure (for example a
/// missing active salary record) is recorded in the report and the batch
/// continues. Payments are upserted by (employee, month), so re-running
/// the same batch with unchanged inputs updates rows in place and never
/// creates duplicates. An existing row keeps its id and disbursement
/// state; all computed fields are replaced in one upsert.
pub fn generate_payroll<L: PaymentLedger>(
    inputs: &[PayrollEmployeeInput],
    config: &PayrollRunConfig,
    ledger: &mut L,
) -> PayrollRunReport {
    let mut report = PayrollRunReport {
        month: config.month,
        succeeded: Vec::new(),
        failed: Vec::new(),
    };

    for input in inputs {
        let employee_id = input.employee.id;
        match process_employee(input, config, ledger) {
            Ok(outcome) => report.succeeded.push(outcome),
            Err(error) => {
                warn!(%employee_id, %error, "payroll generation failed for employee");
                report.failed.push(PaymentFailure { employee_id, error });
            }
        }
    }

    info!(
        month = %report.month,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "payroll run complete"
    );
    report
}

fn process_employee<L: PaymentLedger>(
    input: &PayrollEmployeeInput,
    config: &PayrollRunConfig,
    ledger: &mut L,
) -> EngineResult<PaymentOutcome> {
    let employee = &input.employee;
    let salary = input
        .salary
        .as_ref()
        .ok_or(EngineError::SalaryRecordMissing {
            employee_id: employee.id,
            month: config.month,
        })?;

    let adjustment = config.adjustments.get(&employee.id);

    let unpaid_days = match adjustment.and_then(|a| a.unpaid_days_override) {
        Some(days) if days < Decimal::ZERO => {
            return Err(EngineError::Validation {
                field: "unpaid_days_override".to_string(),
                message: format!("must not be negative, got {days}"),
            });
        }
        Some(days) => days,
        None => input.system_unpaid_days,
    };

    let advance = match adjustment.and_then(|a| a.advance_amount) {
        Some(amount) if amount < Decimal::ZERO => {
            return Err(EngineError::Validation {
                field: "advance_amount".to_string(),
                message: format!("must not be negative, got {amount}"),
            });
        }
        Some(amount) => amount,
        None => Decimal::ZERO,
    };

    let rate = daily_rate(salary.base_salary, config.month.year(), config.month.month())?;
    let deductions =
        leave_deduction(rate, unpaid_days, config.deduction_percentage)?.round_dp(2);
    let advance = advance.round_dp(2);
    let net_salary = salary.base_salary - deductions - advance;

    if net_salary < Decimal::ZERO {
        // Deliberately not clamped: a negative net is an operator signal,
        // usually a misconfigured salary or an oversized advance.
        warn!(
            employee_id = %employee.id,
            %net_salary,
            "payroll produced a negative net salary"
        );
    }

    let existing = ledger.find_payment(employee.id, config.month);
    let payment = SalaryPayment {
        id: existing.map_or_else(Uuid::new_v4, |p| p.id),
        employee_id: employee.id,
        payment_month: config.month,
        base_salary: salary.base_salary,
        unpaid_leave_days: unpaid_days,
        deduction_percentage: config.deduction_percentage,
        leave_deductions: deductions,
        advance_deductions: advance,
        advance_reason: adjustment.and_then(|a| a.advance_reason.clone()),
        net_salary,
        is_paid: existing.is_some_and(|p| p.is_paid),
        paid_at: existing.and_then(|p| p.paid_at),
        generated_at: Utc::now(),
    };

    let action = ledger.upsert_payment(payment.clone())?;
    Ok(PaymentOutcome {
        employee_id: employee.id,
        action,
        payment,
    })
}
