//! DDL for the `contacts` table.
//!
//! The server never runs these on its own; `create-tables` applies them once
//! against a fresh database.

/// PostgreSQL definition. `id` is a plain `integer` serial; queries cast it to
/// `int8` so both backends decode into the same row type.
pub const POSTGRES_CONTACTS: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id SERIAL PRIMARY KEY,
    name VARCHAR(80),
    phone VARCHAR(15),
    email VARCHAR(100)
)
"#;

/// SQLite definition. Length limits are recorded but SQLite does not enforce them.
pub const SQLITE_CONTACTS: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(80),
    phone VARCHAR(15),
    email VARCHAR(100)
)
"#;
