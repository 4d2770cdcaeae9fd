//! Database schema definitions
//!
//! Table and column names match files written by earlier versions of the
//! portal, so existing databases open unchanged.

/// SQL to create the students table
pub const CREATE_STUDENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Students (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT,
    Age INTEGER
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_STUDENTS_TABLE]
}
