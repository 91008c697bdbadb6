//! Leave Balance & Payroll Accrual Engine.
//!
//! This crate computes leave accrual balances (probation vs confirmed tiers)
//! and prorated monthly salary payments for an internal HR system. It is a
//! library with no transport of its own: the surrounding application supplies
//! employee, leave-request, and salary data at the edges and persists the
//! engine's output through the ledger traits.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
