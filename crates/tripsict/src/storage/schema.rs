//! `SQLite` schema definitions for tripsict.

/// SQL statement to create the blobs table.
///
/// Each row holds one JSON-encoded entity sequence under a string key.
pub const CREATE_BLOBS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS blobs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_BLOBS_TABLE, CREATE_METADATA_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_create_blobs_table_contains_required_columns() {
        assert!(CREATE_BLOBS_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_BLOBS_TABLE.contains("value TEXT NOT NULL"));
        assert!(CREATE_BLOBS_TABLE.contains("updated_at TEXT NOT NULL"));
    }
}
