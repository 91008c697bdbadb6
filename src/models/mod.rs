//! Domain models for the accrual engine.
//!
//! These types mirror the rows the surrounding HR application stores:
//! employees and their categories, leave types/requests and the per-day
//! records materialized on approval, derived leave balances, and salary
//! records/payments.

mod balance;
mod employee;
mod leave;
mod salary;

pub use balance::LeaveBalance;
pub use employee::{Employee, EmployeeCategory};
pub use leave::{LeaveDayRecord, LeaveRequest, LeaveStatus, LeaveType};
pub use salary::{SalaryPayment, SalaryRecord, active_salary_for};
