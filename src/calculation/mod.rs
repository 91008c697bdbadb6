//! Calculation logic for the accrual engine.
//!
//! This module contains the business rules: probation classification,
//! leave policy resolution, balance aggregation with probation/confirmed
//! tiers, daily-rate proration, batch payroll generation, and the leave
//! approval state machine.

mod approval;
mod balance;
mod payroll;
mod policy;
mod probation;
mod proration;

pub use approval::{ApprovalOutcome, approve_request, cancel_request, reject_request};
pub use balance::{BalanceView, aggregate_balance, aggregate_employee_balances};
pub use payroll::{
    EmployeeAdjustment, PayrollEmployeeInput, PayrollRunConfig, PayrollRunReport, PaymentFailure,
    PaymentOutcome, generate_payroll,
};
pub use policy::{PolicyLookup, ResolvedPolicy, resolve_policies_for_category, resolve_policy};
pub use probation::{PROBATION_MONTH_DAYS, is_on_probation, probation_end};
pub use proration::{
    daily_rate, days_in_month, first_of_month, leave_deduction, validate_deduction_percentage,
};
