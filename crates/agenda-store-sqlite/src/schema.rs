//! SQL schema for the Agenda SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    phone       TEXT NOT NULL,
    hobbies     TEXT NOT NULL DEFAULT '[]'   -- JSON array of hobby ids
);

-- No foreign key from contacts.hobbies: references are checked by the API on
-- update only, and cleaned up explicitly when a hobby is deleted.
CREATE TABLE IF NOT EXISTS hobbies (
    hobby_id    TEXT PRIMARY KEY,
    description TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_name_idx  ON contacts(name);
CREATE INDEX IF NOT EXISTS contacts_phone_idx ON contacts(phone);

PRAGMA user_version = 1;
";
