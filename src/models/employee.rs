//! Employee and employee category models.
//!
//! Both types are owned by the employee directory and are read-only inside
//! this engine; they carry exactly the fields the balance and payroll
//! calculations consume.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee category (reference data).
///
/// Categories drive which leave policies apply and supply the default
/// probation length for newly hired employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCategory {
    /// Unique identifier for the category.
    pub id: Uuid,
    /// Human-readable category name (e.g., "Permanent Staff").
    pub name: String,
    /// Whether employees in this category accrue paid leave at all.
    pub paid_leave_eligible: bool,
    /// Default probation length in months for employees in this category.
    pub default_probation_months: u32,
}

/// An employee as seen by the accrual engine.
///
/// # Example
///
/// ```
/// use accrual_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let employee = Employee {
///     id: Uuid::new_v4(),
///     name: "A. Rahman".to_string(),
///     category_id: Uuid::new_v4(),
///     join_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     probation_months: 3,
///     base_salary: Decimal::new(5000_00, 2),
///     is_active: true,
/// };
/// assert!(employee.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The employee's category, referencing [`EmployeeCategory::id`].
    pub category_id: Uuid,
    /// The date the employee joined.
    pub join_date: NaiveDate,
    /// Probation length in months for this employee.
    pub probation_months: u32,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Whether the employee is currently active.
    pub is_active: bool,
}
