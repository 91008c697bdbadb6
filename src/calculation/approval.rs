//! Leave request approval transitions.
//!
//! The status state machine is `pending -> {approved, rejected, cancelled}`.
//! Admin tooling may also create a request directly in `approved` and run it
//! through [`approve_request`] to materialize its day records. Repeating a
//! transition to the same status is an idempotent no-op; any other move out
//! of a terminal status is rejected.
//!
//! Approval materializes one [`LeaveDayRecord`] per calendar day in the
//! request's inclusive range. The records are inserted as a single batch,
//! and a request that already has records is never re-materialized, so a
//! retried approval (for example after a network failure) cannot duplicate
//! days.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::ledger::LeaveLedger;
use crate::models::{LeaveDayRecord, LeaveRequest, LeaveStatus, LeaveType};

/// The result of approving a leave request.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// The request with its post-approval status and approver.
    pub request: LeaveRequest,
    /// How many day records this call inserted.
    pub days_materialized: usize,
    /// True when records already existed and materialization was skipped.
    pub already_materialized: bool,
}

/// Approves a request and materializes its per-day leave records.
///
/// Allowed from `pending` or `approved` (the latter is the idempotent
/// retry / admin-created path). Day records carry the request's leave type
/// and its paid/unpaid flag; the balance aggregator and the payroll
/// generator's unpaid-day figure both read them back.
///
/// # Errors
///
/// - `InvalidTransition` when the request is `rejected` or `cancelled`.
/// - `Validation` when the date range is inverted or the supplied leave
///   type does not match the request.
pub fn approve_request<L: LeaveLedger>(
    request: &LeaveRequest,
    leave_type: &LeaveType,
    approver: Uuid,
    ledger: &mut L,
) -> EngineResult<ApprovalOutcome> {
    match request.status {
        LeaveStatus::Pending | LeaveStatus::Approved => {}
        from @ (LeaveStatus::Rejected | LeaveStatus::Cancelled) => {
            return Err(EngineError::InvalidTransition {
                request_id: request.id,
                from,
                to: LeaveStatus::Approved,
            });
        }
    }
    if request.end_date < request.start_date {
        return Err(EngineError::Validation {
            field: "end_date".to_string(),
            message: format!(
                "end date {} precedes start date {}",
                request.end_date, request.start_date
            ),
        });
    }
    if leave_type.id != request.leave_type_id {
        return Err(EngineError::Validation {
            field: "leave_type".to_string(),
            message: format!(
                "leave type {} does not match request's type {}",
                leave_type.id, request.leave_type_id
            ),
        });
    }

    let mut approved = request.clone();
    approved.status = LeaveStatus::Approved;
    approved.approved_by = Some(approver);
    approved.updated_at = Utc::now();

    if ledger.has_day_records(request.id) {
        return Ok(ApprovalOutcome {
            request: approved,
            days_materialized: 0,
            already_materialized: true,
        });
    }

    let records = materialize_days(&approved, leave_type);
    let count = records.len();
    ledger.insert_day_records(records)?;

    Ok(ApprovalOutcome {
        request: approved,
        days_materialized: count,
        already_materialized: false,
    })
}

/// Rejects a pending request.
///
/// Re-rejecting an already rejected request is an idempotent no-op.
pub fn reject_request(request: &LeaveRequest, approver: Uuid) -> EngineResult<LeaveRequest> {
    transition(request, LeaveStatus::Rejected, Some(approver))
}

/// Cancels a pending request.
///
/// Re-cancelling an already cancelled request is an idempotent no-op.
pub fn cancel_request(request: &LeaveRequest) -> EngineResult<LeaveRequest> {
    transition(request, LeaveStatus::Cancelled, None)
}

fn transition(
    request: &LeaveRequest,
    to: LeaveStatus,
    approver: Option<Uuid>,
) -> EngineResult<LeaveRequest> {
    if request.status != LeaveStatus::Pending && request.status != to {
        return Err(EngineError::InvalidTransition {
            request_id: request.id,
            from: request.status,
            to,
        });
    }

    let mut updated = request.clone();
    updated.status = to;
    if approver.is_some() {
        updated.approved_by = approver;
    }
    updated.updated_at = Utc::now();
    Ok(updated)
}

/// One day record per calendar day in the request's inclusive range.
fn materialize_days(request: &LeaveRequest, leave_type: &LeaveType) -> Vec<LeaveDayRecord> {
    request
        .start_date
        .iter_days()
        .take_while(|d| *d <= request.end_date)
        .map(|date| LeaveDayRecord {
            id: Uuid::new_v4(),
            request_id: request.id,
            employee_id: request.employee_id,
            leave_type_id: request.leave_type_id,
            date,
            is_paid: leave_type.is_paid,
        })
        .collect()
}
