//! End-to-end tests for the Leave Balance & Payroll Accrual Engine.
//!
//! This suite drives the full pipeline the surrounding HR application uses:
//! load reference data, approve leave requests (materializing per-day
//! records), aggregate balances, and generate monthly payroll against the
//! in-memory ledgers.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use accrual_engine::calculation::{
    BalanceView, EmployeeAdjustment, PayrollEmployeeInput, PayrollRunConfig,
    aggregate_employee_balances, approve_request, generate_payroll,
    resolve_policies_for_category,
};
use accrual_engine::config::PolicyLoader;
use accrual_engine::ledger::{
    InMemoryLeaveLedger, InMemoryPaymentLedger, LeaveLedger, PaymentAction, PaymentLedger,
};
use accrual_engine::models::{
    Employee, LeaveRequest, LeaveStatus, SalaryRecord, active_salary_for,
};

// =============================================================================
// Test Helpers
// =============================================================================

/// Permanent Staff category in config/policies/categories.yaml.
const PERMANENT_STAFF: u128 = 0x0101;
/// Unpaid Leave type in config/policies/leave_types.yaml.
const UNPAID_LEAVE: u128 = 0x0203;
/// Annual Leave type in config/policies/leave_types.yaml.
const ANNUAL_LEAVE: u128 = 0x0201;

fn uid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn load_config() -> PolicyLoader {
    PolicyLoader::load("./config/policies").expect("Failed to load config")
}

fn permanent_employee(join: NaiveDate, base_salary: &str) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        name: "A. Rahman".to_string(),
        category_id: uid(PERMANENT_STAFF),
        join_date: join,
        probation_months: 3,
        base_salary: dec(base_salary),
        is_active: true,
    }
}

fn salary_records(employee: &Employee) -> Vec<SalaryRecord> {
    vec![SalaryRecord {
        id: Uuid::new_v4(),
        employee_id: employee.id,
        base_salary: employee.base_salary,
        currency: "BDT".to_string(),
        effective_from: employee.join_date,
        effective_to: None,
        is_active: true,
    }]
}

fn leave_request(
    employee: &Employee,
    leave_type_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> LeaveRequest {
    LeaveRequest {
        id: Uuid::new_v4(),
        employee_id: employee.id,
        leave_type_id,
        start_date: start,
        end_date: end,
        days_requested: Decimal::from((end - start).num_days() + 1),
        status: LeaveStatus::Pending,
        approved_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn payroll_input(
    employee: &Employee,
    records: &[SalaryRecord],
    leave_ledger: &InMemoryLeaveLedger,
    year: i32,
    month: u32,
) -> PayrollEmployeeInput {
    let salary = active_salary_for(records, date(year, month, 1))
        .unwrap()
        .cloned();
    PayrollEmployeeInput {
        employee: employee.clone(),
        salary,
        system_unpaid_days: leave_ledger.unpaid_days_in_month(employee.id, year, month),
    }
}

// =============================================================================
// Full pipeline: approval -> unpaid days -> payroll
// =============================================================================

#[test]
fn test_unpaid_leave_flows_into_payroll() {
    let loader = load_config();
    let unpaid = loader.get_leave_type(uid(UNPAID_LEAVE)).unwrap().clone();

    let employee = permanent_employee(date(2024, 1, 1), "5000");
    let records = salary_records(&employee);
    let mut leave_ledger = InMemoryLeaveLedger::new();
    let mut payment_ledger = InMemoryPaymentLedger::new();

    // Two unpaid days in October 2025.
    let request = leave_request(&employee, unpaid.id, date(2025, 10, 6), date(2025, 10, 7));
    let outcome = approve_request(&request, &unpaid, Uuid::new_v4(), &mut leave_ledger).unwrap();
    assert_eq!(outcome.days_materialized, 2);

    let inputs = vec![payroll_input(
        &employee,
        &records,
        &leave_ledger,
        2025,
        10,
    )];
    assert_eq!(inputs[0].system_unpaid_days, dec("2"));

    let config = PayrollRunConfig::new(2025, 10).unwrap();
    let report = generate_payroll(&inputs, &config, &mut payment_ledger);

    assert!(report.is_fully_successful());
    let payment = &report.succeeded[0].payment;
    // 5000 / 31 days = 161.29...; 2 days at 100% = 322.58.
    assert_eq!(payment.leave_deductions, dec("322.58"));
    assert_eq!(payment.net_salary, dec("4677.42"));
    assert_eq!(payment.unpaid_leave_days, dec("2"));
}

#[test]
fn test_paid_leave_does_not_reduce_salary() {
    let loader = load_config();
    let annual = loader.get_leave_type(uid(ANNUAL_LEAVE)).unwrap().clone();

    let employee = permanent_employee(date(2024, 1, 1), "5000");
    let records = salary_records(&employee);
    let mut leave_ledger = InMemoryLeaveLedger::new();
    let mut payment_ledger = InMemoryPaymentLedger::new();

    let request = leave_request(&employee, annual.id, date(2025, 10, 6), date(2025, 10, 8));
    approve_request(&request, &annual, Uuid::new_v4(), &mut leave_ledger).unwrap();

    let inputs = vec![payroll_input(
        &employee,
        &records,
        &leave_ledger,
        2025,
        10,
    )];
    assert_eq!(inputs[0].system_unpaid_days, Decimal::ZERO);

    let config = PayrollRunConfig::new(2025, 10).unwrap();
    let report = generate_payroll(&inputs, &config, &mut payment_ledger);
    assert_eq!(report.succeeded[0].payment.net_salary, dec("5000"));
}

#[test]
fn test_reapproval_does_not_duplicate_unpaid_days() {
    let loader = load_config();
    let unpaid = loader.get_leave_type(uid(UNPAID_LEAVE)).unwrap().clone();

    let employee = permanent_employee(date(2024, 1, 1), "5000");
    let mut leave_ledger = InMemoryLeaveLedger::new();

    let request = leave_request(&employee, unpaid.id, date(2025, 1, 10), date(2025, 1, 12));
    let first = approve_request(&request, &unpaid, Uuid::new_v4(), &mut leave_ledger).unwrap();
    assert_eq!(first.days_materialized, 3);

    // Retried approval, e.g. after a network retry from the UI.
    let again =
        approve_request(&first.request, &unpaid, Uuid::new_v4(), &mut leave_ledger).unwrap();
    assert!(again.already_materialized);

    assert_eq!(
        leave_ledger.unpaid_days_in_month(employee.id, 2025, 1),
        dec("3")
    );
}

// =============================================================================
// Payroll idempotence and batch isolation
// =============================================================================

#[test]
fn test_payroll_rerun_is_idempotent() {
    let employee_a = permanent_employee(date(2024, 1, 1), "5000");
    let employee_b = permanent_employee(date(2023, 5, 1), "7500");
    let records_a = salary_records(&employee_a);
    let records_b = salary_records(&employee_b);
    let leave_ledger = InMemoryLeaveLedger::new();
    let mut payment_ledger = InMemoryPaymentLedger::new();

    let inputs = vec![
        payroll_input(&employee_a, &records_a, &leave_ledger, 2025, 10),
        payroll_input(&employee_b, &records_b, &leave_ledger, 2025, 10),
    ];
    let config = PayrollRunConfig::new(2025, 10).unwrap();

    let first = generate_payroll(&inputs, &config, &mut payment_ledger);
    let second = generate_payroll(&inputs, &config, &mut payment_ledger);

    assert_eq!(payment_ledger.payments_for_month(date(2025, 10, 1)).len(), 2);
    for (a, b) in first.succeeded.iter().zip(&second.succeeded) {
        assert_eq!(a.payment.net_salary, b.payment.net_salary);
        assert_eq!(b.action, PaymentAction::Updated);
    }
}

#[test]
fn test_one_failure_does_not_abort_the_batch() {
    let employee_a = permanent_employee(date(2024, 1, 1), "5000");
    let employee_b = permanent_employee(date(2023, 5, 1), "7500");
    let records_b = salary_records(&employee_b);
    let leave_ledger = InMemoryLeaveLedger::new();
    let mut payment_ledger = InMemoryPaymentLedger::new();

    // Employee A has no salary record at all.
    let inputs = vec![
        PayrollEmployeeInput {
            employee: employee_a.clone(),
            salary: None,
            system_unpaid_days: Decimal::ZERO,
        },
        payroll_input(&employee_b, &records_b, &leave_ledger, 2025, 10),
    ];

    let config = PayrollRunConfig::new(2025, 10).unwrap();
    let report = generate_payroll(&inputs, &config, &mut payment_ledger);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].employee_id, employee_a.id);
    assert_eq!(report.succeeded.len(), 1);
    assert!(
        payment_ledger
            .find_payment(employee_b.id, date(2025, 10, 1))
            .is_some()
    );
}

#[test]
fn test_advance_can_push_net_negative() {
    let employee = permanent_employee(date(2024, 1, 1), "1000");
    let records = salary_records(&employee);
    let leave_ledger = InMemoryLeaveLedger::new();
    let mut payment_ledger = InMemoryPaymentLedger::new();

    let config = PayrollRunConfig::new(2025, 10).unwrap().with_adjustment(
        employee.id,
        EmployeeAdjustment {
            advance_amount: Some(dec("1500")),
            advance_reason: Some("relocation advance".to_string()),
            ..Default::default()
        },
    );

    let inputs = vec![payroll_input(&employee, &records, &leave_ledger, 2025, 10)];
    let report = generate_payroll(&inputs, &config, &mut payment_ledger);

    // Negative nets are surfaced, not clamped.
    assert_eq!(report.succeeded[0].payment.net_salary, dec("-500"));
}

// =============================================================================
// Balance aggregation against loaded reference data
// =============================================================================

#[test]
fn test_probation_balance_from_config() {
    let loader = load_config();
    // Joined 2025-01-01, 3-month probation: window ends 2025-04-01.
    let employee = permanent_employee(date(2025, 1, 1), "5000");

    let resolved = resolve_policies_for_category(loader.config(), employee.category_id);
    assert_eq!(resolved.len(), 3);

    // Three annual-leave days taken inside the probation window.
    let mut request = leave_request(
        &employee,
        uid(ANNUAL_LEAVE),
        date(2025, 2, 10),
        date(2025, 2, 12),
    );
    request.status = LeaveStatus::Approved;

    let balances = aggregate_employee_balances(
        &employee,
        &resolved,
        &[request],
        2025,
        BalanceView::Year,
    );

    let annual = balances
        .iter()
        .find(|b| b.leave_type_name == "Annual Leave")
        .unwrap();
    assert_eq!(annual.probation_allocated_days, dec("5"));
    assert_eq!(annual.probation_used_days, dec("3"));
    assert_eq!(annual.probation_remaining_days, dec("2"));
    // Confirmed allocation untouched by probation usage.
    assert_eq!(annual.used_days, Decimal::ZERO);
    assert_eq!(annual.remaining_days, dec("20"));

    // Every balance row holds the invariant for both tiers.
    for balance in &balances {
        assert_eq!(
            balance.remaining_days,
            balance.allocated_days - balance.used_days
        );
        assert_eq!(
            balance.probation_remaining_days,
            balance.probation_allocated_days - balance.probation_used_days
        );
    }
}

#[test]
fn test_unconfigured_category_gets_placeholder_row() {
    let loader = load_config();
    let mut employee = permanent_employee(date(2024, 1, 1), "5000");
    // A category with no policies configured at all.
    employee.category_id = Uuid::new_v4();

    let resolved = resolve_policies_for_category(loader.config(), employee.category_id);
    let balances =
        aggregate_employee_balances(&employee, &resolved, &[], 2025, BalanceView::Year);

    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].leave_type_name, "none");
    assert_eq!(balances[0].leave_type_id, None);
}

#[test]
fn test_month_view_and_year_view_disagree_on_usage() {
    let loader = load_config();
    let employee = permanent_employee(date(2024, 1, 1), "5000");
    let resolved = resolve_policies_for_category(loader.config(), employee.category_id);

    let mut march = leave_request(
        &employee,
        uid(ANNUAL_LEAVE),
        date(2025, 3, 3),
        date(2025, 3, 7),
    );
    march.status = LeaveStatus::Approved;
    let mut july = leave_request(
        &employee,
        uid(ANNUAL_LEAVE),
        date(2025, 7, 7),
        date(2025, 7, 11),
    );
    july.status = LeaveStatus::Approved;
    let requests = vec![march, july];

    let year = aggregate_employee_balances(
        &employee,
        &resolved,
        &requests,
        2025,
        BalanceView::Year,
    );
    let month = aggregate_employee_balances(
        &employee,
        &resolved,
        &requests,
        2025,
        BalanceView::Month(3),
    );

    let annual_year = year
        .iter()
        .find(|b| b.leave_type_name == "Annual Leave")
        .unwrap();
    let annual_march = month
        .iter()
        .find(|b| b.leave_type_name == "Annual Leave")
        .unwrap();

    assert_eq!(annual_year.used_days, dec("10"));
    assert_eq!(annual_march.used_days, dec("5"));
    // Allocation stays the full-year cap under the month filter.
    assert_eq!(annual_march.allocated_days, annual_year.allocated_days);
    assert_eq!(annual_year.usage_percentage(), Some(dec("50")));
    assert_eq!(annual_march.usage_percentage(), Some(dec("25")));
}

// =============================================================================
// Salary record selection
// =============================================================================

#[test]
fn test_salary_revision_is_picked_by_effective_date() {
    let employee = permanent_employee(date(2023, 1, 1), "5000");
    let leave_ledger = InMemoryLeaveLedger::new();
    let mut payment_ledger = InMemoryPaymentLedger::new();

    // Raise effective July 2025: the old record closes, the new one opens.
    let records = vec![
        SalaryRecord {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            base_salary: dec("5000"),
            currency: "BDT".to_string(),
            effective_from: date(2023, 1, 1),
            effective_to: Some(date(2025, 6, 30)),
            is_active: true,
        },
        SalaryRecord {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            base_salary: dec("6200"),
            currency: "BDT".to_string(),
            effective_from: date(2025, 7, 1),
            effective_to: None,
            is_active: true,
        },
    ];

    let inputs = vec![payroll_input(&employee, &records, &leave_ledger, 2025, 10)];
    let config = PayrollRunConfig::new(2025, 10).unwrap();
    let report = generate_payroll(&inputs, &config, &mut payment_ledger);

    assert_eq!(report.succeeded[0].payment.base_salary, dec("6200"));
    assert_eq!(report.succeeded[0].payment.net_salary, dec("6200"));
}
