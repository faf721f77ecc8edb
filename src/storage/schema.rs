//! SQL schema definitions as const strings.
//!
//! Contains the SQLite schema for the local mailbox.

/// SQL to create the labels table.
pub const CREATE_LABELS: &str = r#"
CREATE TABLE IF NOT EXISTS labels (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
)
"#;

/// SQL to create the threads table.
pub const CREATE_THREADS: &str = r#"
CREATE TABLE IF NOT EXISTS threads (
    id TEXT PRIMARY KEY,
    in_inbox INTEGER NOT NULL DEFAULT 1,
    position INTEGER NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// SQL to create the messages table.
pub const CREATE_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    thread_id TEXT NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    from_header TEXT NOT NULL,
    to_header TEXT NOT NULL,
    subject TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (thread_id, position)
)
"#;

/// SQL to create the thread/label association table.
pub const CREATE_THREAD_LABELS: &str = r#"
CREATE TABLE IF NOT EXISTS thread_labels (
    thread_id TEXT NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
    label_id TEXT NOT NULL REFERENCES labels(id) ON DELETE CASCADE,
    applied_at TEXT NOT NULL,
    PRIMARY KEY (thread_id, label_id)
)
"#;

/// SQL to create indexes.
pub const CREATE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_threads_inbox ON threads(in_inbox, position);
CREATE INDEX IF NOT EXISTS idx_thread_labels_label ON thread_labels(label_id)
"#;

/// Returns all migrations in the order they must run.
pub fn all_migrations() -> Vec<&'static str> {
    vec![
        CREATE_LABELS,
        CREATE_THREADS,
        CREATE_MESSAGES,
        CREATE_THREAD_LABELS,
        CREATE_INDEXES,
    ]
}
