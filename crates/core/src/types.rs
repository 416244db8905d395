/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Actor recorded in the `created_by` / `updated_by` / `deleted_by` audit columns.
pub const SYSTEM_ACTOR: &str = "System";
