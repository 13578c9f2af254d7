//! Table definition for the contacts store
//!
//! There is no migrations mechanism: the schema is created if absent and
//! left alone otherwise. Changing it requires manual intervention.

use rusqlite::Connection;

/// `timestamp` holds Unix milliseconds (UTC). `AUTOINCREMENT` keeps ids
/// from being reused after deletes.
const CREATE_CONTACTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        ip_address TEXT
    );
"#;

/// Create the `contacts` table if it does not exist. Safe to call repeatedly.
pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(CREATE_CONTACTS_TABLE)
}
