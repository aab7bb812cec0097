//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create DTOs for inserts
//! - Request/response DTOs for the endpoints that operate on the entity

pub mod design;
pub mod usage;
