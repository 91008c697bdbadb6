//! Error types for the Leave Balance & Payroll Accrual Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during balance aggregation and
//! payroll generation.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::LeaveStatus;

/// The main error type for the accrual engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. No condition
/// in the engine panics; everything resolves to one of these variants.
///
/// # Example
///
/// ```
/// use accrual_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policies.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policies.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed cross-reference checks.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An operator-supplied input was malformed.
    ///
    /// Raised before any persistence happens: negative unpaid days,
    /// a deduction percentage outside `[0, 100]`, an inverted date range.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// No active salary record exists for an employee in a payroll run.
    ///
    /// Recorded per employee inside a batch; never aborts the whole run.
    #[error("No active salary record for employee {employee_id} in month {month}")]
    SalaryRecordMissing {
        /// The employee without an active salary record.
        employee_id: Uuid,
        /// The payment month being generated.
        month: NaiveDate,
    },

    /// A leave request status transition that the state machine does not allow.
    #[error("Leave request {request_id} cannot move from '{from}' to '{to}'")]
    InvalidTransition {
        /// The id of the leave request.
        request_id: Uuid,
        /// The current status of the request.
        from: LeaveStatus,
        /// The status the caller attempted to move to.
        to: LeaveStatus,
    },

    /// A second payment row was offered for an (employee, month) key.
    ///
    /// The in-memory ledger upserts and never produces this; store-backed
    /// ledger implementations surface their uniqueness constraint through it.
    #[error("A payment already exists for employee {employee_id} in month {month}")]
    DuplicatePayment {
        /// The employee with the conflicting payment.
        employee_id: Uuid,
        /// The payment month with the conflicting payment.
        month: NaiveDate,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;
