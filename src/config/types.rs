//! Configuration types for leave reference data.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML reference-data files, plus the aggregated [`PolicyConfig`]
//! the rest of the engine queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{EmployeeCategory, LeaveType};

/// A leave policy tying an employee category and leave type to its caps.
///
/// At most one active policy should exist per (category, leave type) pair.
/// When none exists the pair simply accrues nothing; when several exist the
/// resolver picks the most recently created one and flags the duplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Unique identifier for the policy.
    pub id: Uuid,
    /// The employee category the policy applies to.
    pub category_id: Uuid,
    /// The leave type the policy covers.
    pub leave_type_id: Uuid,
    /// Annual allocation cap for confirmed employees.
    pub max_days_per_year: Decimal,
    /// Allocation cap while inside the probation window.
    pub probation_max_days: Decimal,
    /// When the policy row was created; used to break duplicates.
    pub created_at: DateTime<Utc>,
    /// Whether the policy is active.
    pub is_active: bool,
}

/// `categories.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesFile {
    /// All employee categories.
    pub categories: Vec<EmployeeCategory>,
}

/// `leave_types.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesFile {
    /// All leave types.
    pub leave_types: Vec<LeaveType>,
}

/// `policies.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PoliciesFile {
    /// All leave policies.
    pub policies: Vec<LeavePolicy>,
}

/// Aggregated reference data with id-keyed lookups.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    categories: HashMap<Uuid, EmployeeCategory>,
    leave_types: HashMap<Uuid, LeaveType>,
    policies: Vec<LeavePolicy>,
}

impl PolicyConfig {
    /// Builds a configuration from its parts.
    pub fn new(
        categories: Vec<EmployeeCategory>,
        leave_types: Vec<LeaveType>,
        policies: Vec<LeavePolicy>,
    ) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            leave_types: leave_types.into_iter().map(|t| (t.id, t)).collect(),
            policies,
        }
    }

    /// All employee categories, keyed by id.
    pub fn categories(&self) -> &HashMap<Uuid, EmployeeCategory> {
        &self.categories
    }

    /// All leave types, keyed by id.
    pub fn leave_types(&self) -> &HashMap<Uuid, LeaveType> {
        &self.leave_types
    }

    /// All leave policies.
    pub fn policies(&self) -> &[LeavePolicy] {
        &self.policies
    }

    /// Looks up a category by id.
    pub fn get_category(&self, id: Uuid) -> Option<&EmployeeCategory> {
        self.categories.get(&id)
    }

    /// Looks up a leave type by id.
    pub fn get_leave_type(&self, id: Uuid) -> Option<&LeaveType> {
        self.leave_types.get(&id)
    }

    /// The leave types that have at least one active policy for a category.
    ///
    /// This is the set of leave types an employee of that category can
    /// accrue; an empty result means the employee gets the placeholder
    /// balance row. Results are sorted by leave type name so roll-ups are
    /// deterministic.
    pub fn leave_types_for_category(&self, category_id: Uuid) -> Vec<&LeaveType> {
        let mut seen: Vec<&LeaveType> = Vec::new();
        for policy in &self.policies {
            if policy.category_id != category_id || !policy.is_active {
                continue;
            }
            if let Some(leave_type) = self.leave_types.get(&policy.leave_type_id)
                && !seen.iter().any(|t| t.id == leave_type.id)
            {
                seen.push(leave_type);
            }
        }
        seen.sort_by(|a, b| a.name.cmp(&b.name));
        seen
    }
}
