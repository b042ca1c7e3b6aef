//! SQL schema for the annals SQLite store.
//!
//! The schema version lives in `PRAGMA user_version`. Opening a store applies
//! every migration newer than the recorded version, each in its own
//! transaction. Migrations only ever add tables, so collections created by an
//! older version keep their rows.

/// Connection-level settings applied on every open.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

pub struct Migration {
  pub version: i64,
  pub name:    &'static str,
  pub sql:     &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
  Migration {
    version: 1,
    name:    "events",
    sql:     "
CREATE TABLE IF NOT EXISTS events (
    id                       INTEGER PRIMARY KEY AUTOINCREMENT,
    date                     TEXT NOT NULL DEFAULT '',   -- d-m-y, unvalidated
    description              TEXT NOT NULL DEFAULT '',
    tag                      TEXT NOT NULL DEFAULT '',
    file_links               TEXT NOT NULL DEFAULT '[]', -- JSON array of strings
    condemnation             TEXT NOT NULL DEFAULT '',
    condemnation_description TEXT NOT NULL DEFAULT ''
);
",
  },
  Migration {
    version: 2,
    name:    "topic_contents",
    sql:     "
-- Keyed by the ids of the topicsList setting; the link is not enforced.
CREATE TABLE IF NOT EXISTS topic_contents (
    id      TEXT PRIMARY KEY,
    content TEXT NOT NULL DEFAULT ''
);
",
  },
  Migration {
    version: 3,
    name:    "settings",
    sql:     "
CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL    -- JSON payload
);
",
  },
];

/// The schema version a freshly opened store ends up at.
pub const CURRENT_VERSION: i64 = 3;
