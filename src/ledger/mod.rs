//! Persistence seams for payments and per-day leave records.
//!
//! The engine itself is stateless between invocations; everything it
//! persists goes through these traits. The in-memory implementations back
//! tests and small deployments. Store-backed implementations must enforce
//! a uniqueness constraint on (employee, payment month) so that two payroll
//! runs racing from different admin sessions cannot both insert a row.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveDayRecord, SalaryPayment};

/// What an upsert did to the payment row for its (employee, month) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    /// No row existed for the key; one was inserted.
    Created,
    /// A row existed for the key and was replaced in place.
    Updated,
}

/// The payroll payment ledger.
///
/// Payments are keyed by (employee id, payment month). [`upsert_payment`]
/// replaces in place rather than inserting a second row, which is what makes
/// payroll generation idempotent. Deletion is explicit only.
///
/// [`upsert_payment`]: PaymentLedger::upsert_payment
pub trait PaymentLedger {
    /// Finds the payment for an employee and month, if one exists.
    fn find_payment(&self, employee_id: Uuid, month: NaiveDate) -> Option<&SalaryPayment>;

    /// Inserts or replaces the payment for its (employee, month) key.
    fn upsert_payment(&mut self, payment: SalaryPayment) -> EngineResult<PaymentAction>;

    /// Removes and returns the payment for an employee and month.
    fn remove_payment(&mut self, employee_id: Uuid, month: NaiveDate) -> Option<SalaryPayment>;

    /// All payments for a month, in unspecified order.
    fn payments_for_month(&self, month: NaiveDate) -> Vec<&SalaryPayment>;
}

/// The per-day leave record ledger.
///
/// Approval materializes one record per calendar day of a request, inserted
/// as a single batch so a retried approval after a partial failure cannot
/// half-apply. [`has_day_records`] is the guard against materializing a
/// request twice.
///
/// [`has_day_records`]: LeaveLedger::has_day_records
pub trait LeaveLedger {
    /// Whether any day records exist for a request.
    fn has_day_records(&self, request_id: Uuid) -> bool;

    /// Inserts the full batch of day records for one request.
    ///
    /// Fails without inserting anything when records already exist for
    /// the request id.
    fn insert_day_records(&mut self, records: Vec<LeaveDayRecord>) -> EngineResult<()>;

    /// The day records for a request, in date order.
    fn day_records_for_request(&self, request_id: Uuid) -> Vec<&LeaveDayRecord>;

    /// Number of unpaid leave days an employee has in a calendar month.
    ///
    /// This is the system-calculated figure the payroll generator consumes
    /// when no manual override is supplied.
    fn unpaid_days_in_month(&self, employee_id: Uuid, year: i32, month: u32) -> Decimal;
}

/// In-memory [`PaymentLedger`] backed by a keyed map.
///
/// The map key makes a duplicate row for an (employee, month) pair
/// unrepresentable.
#[derive(Debug, Default)]
pub struct InMemoryPaymentLedger {
    payments: HashMap<(Uuid, NaiveDate), SalaryPayment>,
}

impl InMemoryPaymentLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of payment rows held.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Whether the ledger holds no payments.
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

impl PaymentLedger for InMemoryPaymentLedger {
    fn find_payment(&self, employee_id: Uuid, month: NaiveDate) -> Option<&SalaryPayment> {
        self.payments.get(&(employee_id, month))
    }

    fn upsert_payment(&mut self, payment: SalaryPayment) -> EngineResult<PaymentAction> {
        let key = (payment.employee_id, payment.payment_month);
        match self.payments.insert(key, payment) {
            Some(_) => Ok(PaymentAction::Updated),
            None => Ok(PaymentAction::Created),
        }
    }

    fn remove_payment(&mut self, employee_id: Uuid, month: NaiveDate) -> Option<SalaryPayment> {
        self.payments.remove(&(employee_id, month))
    }

    fn payments_for_month(&self, month: NaiveDate) -> Vec<&SalaryPayment> {
        self.payments
            .values()
            .filter(|p| p.payment_month == month)
            .collect()
    }
}

/// In-memory [`LeaveLedger`] keyed by request id.
#[derive(Debug, Default)]
pub struct InMemoryLeaveLedger {
    records: HashMap<Uuid, Vec<LeaveDayRecord>>,
}

impl InMemoryLeaveLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of day records held across all requests.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// Whether the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LeaveLedger for InMemoryLeaveLedger {
    fn has_day_records(&self, request_id: Uuid) -> bool {
        self.records
            .get(&request_id)
            .is_some_and(|r| !r.is_empty())
    }

    fn insert_day_records(&mut self, records: Vec<LeaveDayRecord>) -> EngineResult<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        let request_id = first.request_id;

        if records.iter().any(|r| r.request_id != request_id) {
            return Err(EngineError::Validation {
                field: "request_id".to_string(),
                message: "a day-record batch must belong to a single request".to_string(),
            });
        }
        if self.has_day_records(request_id) {
            return Err(EngineError::Validation {
                field: "request_id".to_string(),
                message: format!("day records already exist for request {request_id}"),
            });
        }

        let mut records = records;
        records.sort_by_key(|r| r.date);
        self.records.insert(request_id, records);
        Ok(())
    }

    fn day_records_for_request(&self, request_id: Uuid) -> Vec<&LeaveDayRecord> {
        self.records
            .get(&request_id)
            .map(|r| r.iter().collect())
            .unwrap_or_default()
    }

    fn unpaid_days_in_month(&self, employee_id: Uuid, year: i32, month: u32) -> Decimal {
        let count = self
            .records
            .values()
            .flatten()
            .filter(|r| {
                r.employee_id == employee_id
                    && !r.is_paid
                    && r.date.year() == year
                    && r.date.month() == month
            })
            .count();
        Decimal::from(count)
    }
}
