//! Reference-data configuration for the accrual engine.
//!
//! Employee categories, leave types, and leave policies are immutable
//! reference data maintained by HR admins. They are loaded from YAML files
//! by [`PolicyLoader`] and queried through [`PolicyConfig`].

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{
    CategoriesFile, LeavePolicy, LeaveTypesFile, PoliciesFile, PolicyConfig,
};
