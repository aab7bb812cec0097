//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod design_repo;
pub mod usage_repo;

pub use design_repo::DesignRepo;
pub use usage_repo::UsageRepo;
