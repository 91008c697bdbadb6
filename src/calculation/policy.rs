//! Leave policy resolution.
//!
//! Given an employee category and a leave type, finds the applicable
//! allocation caps. A missing policy is not an error: the pair simply
//! accrues nothing. Duplicate active policies are a data-integrity problem
//! that gets resolved deterministically and flagged, never failed on.

use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::config::{LeavePolicy, PolicyConfig};
use crate::models::LeaveType;

/// The allocation caps resolved for a (category, leave type) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPolicy {
    /// Annual allocation cap for confirmed employees.
    pub max_days_per_year: Decimal,
    /// Allocation cap inside the probation window.
    pub probation_max_days: Decimal,
}

/// The outcome of a policy lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyLookup {
    /// The resolved caps, or `None` when no active policy exists.
    pub policy: Option<ResolvedPolicy>,
    /// True when more than one active policy matched the pair.
    pub duplicates_detected: bool,
}

impl PolicyLookup {
    /// The confirmed-tier cap, zero when no policy is configured.
    pub fn max_days_per_year(&self) -> Decimal {
        self.policy.map_or(Decimal::ZERO, |p| p.max_days_per_year)
    }

    /// The probation-tier cap, zero when no policy is configured.
    pub fn probation_max_days(&self) -> Decimal {
        self.policy.map_or(Decimal::ZERO, |p| p.probation_max_days)
    }
}

/// Resolves the active policy for a (category, leave type) pair.
///
/// When several active policies match the pair, the most recently created
/// one wins (ties broken by id so the choice is deterministic), and the
/// duplication is flagged to the caller and logged as a data-quality
/// warning. When none match, allocation is zero.
pub fn resolve_policy(
    policies: &[LeavePolicy],
    category_id: Uuid,
    leave_type_id: Uuid,
) -> PolicyLookup {
    let mut matching: Vec<&LeavePolicy> = policies
        .iter()
        .filter(|p| p.is_active && p.category_id == category_id && p.leave_type_id == leave_type_id)
        .collect();

    match matching.len() {
        0 => {
            warn!(
                %category_id,
                %leave_type_id,
                "no active leave policy configured; allocation is zero"
            );
            PolicyLookup {
                policy: None,
                duplicates_detected: false,
            }
        }
        1 => PolicyLookup {
            policy: Some(resolved(matching[0])),
            duplicates_detected: false,
        },
        n => {
            matching.sort_by_key(|p| (p.created_at, p.id));
            let winner = matching[n - 1];
            warn!(
                %category_id,
                %leave_type_id,
                count = n,
                winner = %winner.id,
                "duplicate active leave policies; using the most recently created"
            );
            PolicyLookup {
                policy: Some(resolved(winner)),
                duplicates_detected: true,
            }
        }
    }
}

/// Resolves every leave type configured for a category.
///
/// One entry per leave type with an active policy, paired with its lookup.
/// This is the shape the balance aggregator consumes.
pub fn resolve_policies_for_category(
    config: &PolicyConfig,
    category_id: Uuid,
) -> Vec<(LeaveType, PolicyLookup)> {
    config
        .leave_types_for_category(category_id)
        .into_iter()
        .map(|leave_type| {
            let lookup = resolve_policy(config.policies(), category_id, leave_type.id);
            (leave_type.clone(), lookup)
        })
        .collect()
}

fn resolved(policy: &LeavePolicy) -> ResolvedPolicy {
    ResolvedPolicy {
        max_days_per_year: policy.max_days_per_year,
        probation_max_days: policy.probation_max_days,
    }
}
