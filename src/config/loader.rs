//! Reference-data loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading employee
//! categories, leave types, and leave policies from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeCategory, LeaveType};

use super::types::{CategoriesFile, LeaveTypesFile, PoliciesFile, PolicyConfig};

/// Loads and provides access to leave reference data.
///
/// The `PolicyLoader` reads YAML files from a directory and provides
/// methods to query categories, leave types, and policies.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/policies/
/// ├── categories.yaml   # Employee categories
/// ├── leave_types.yaml  # Leave types
/// └── policies.yaml     # (category, leave type) allocation caps
/// ```
///
/// # Example
///
/// ```no_run
/// use accrual_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/policies").unwrap();
/// for category in loader.config().categories().values() {
///     println!("Category: {}", category.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    config: PolicyConfig,
}

impl PolicyLoader {
    /// Loads reference data from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/policies")
    ///
    /// # Returns
    ///
    /// Returns a `PolicyLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A policy references an unknown category or leave type
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let categories_path = path.join("categories.yaml");
        let categories = Self::load_yaml::<CategoriesFile>(&categories_path)?;

        let leave_types_path = path.join("leave_types.yaml");
        let leave_types = Self::load_yaml::<LeaveTypesFile>(&leave_types_path)?;

        let policies_path = path.join("policies.yaml");
        let policies = Self::load_yaml::<PoliciesFile>(&policies_path)?;

        let config = PolicyConfig::new(
            categories.categories,
            leave_types.leave_types,
            policies.policies,
        );
        validate_references(&config, &policies_path.display().to_string())?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying reference-data configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Gets an employee category by id.
    pub fn get_category(&self, id: uuid::Uuid) -> Option<&EmployeeCategory> {
        self.config.get_category(id)
    }

    /// Gets a leave type by id.
    pub fn get_leave_type(&self, id: uuid::Uuid) -> Option<&LeaveType> {
        self.config.get_leave_type(id)
    }
}

/// Checks that every policy references a known category and leave type.
fn validate_references(config: &PolicyConfig, path: &str) -> EngineResult<()> {
    for policy in config.policies() {
        if config.get_category(policy.category_id).is_none() {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: format!(
                    "policy {} references unknown category {}",
                    policy.id, policy.category_id
                ),
            });
        }
        if config.get_leave_type(policy.leave_type_id).is_none() {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: format!(
                    "policy {} references unknown leave type {}",
                    policy.id, policy.leave_type_id
                ),
            });
        }
    }
    Ok(())
}
