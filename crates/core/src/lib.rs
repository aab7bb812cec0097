//! Roomlift domain core.
//!
//! Pure domain logic shared by the server and the device client:
//! primitive type aliases, the domain error taxonomy, prompt synthesis
//! with the design vocabulary, and free-tier quota rules. No I/O.

pub mod error;
pub mod prompt;
pub mod quota;
pub mod types;
