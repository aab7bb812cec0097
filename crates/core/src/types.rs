/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque per-device anonymous identity token (uuid-v4 string).
///
/// Created once on a device, persisted indefinitely, never mutated.
/// The server treats it as an opaque key; it carries no account data.
pub type Identity = String;
