//! Thread and message queries.

use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::domain::{Message, ThreadId};

/// Inserts a thread into the inbox, after every existing thread, together
/// with its messages in order.
pub fn insert(conn: &Connection, thread_id: &ThreadId, messages: &[Message]) -> Result<()> {
    conn.execute(
        "INSERT INTO threads (id, in_inbox, position, created_at)
         VALUES (?1, 1, (SELECT COALESCE(MAX(position), -1) + 1 FROM threads), datetime('now'))",
        params![thread_id.0.as_str()],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO messages (thread_id, position, from_header, to_header, subject)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for (position, message) in messages.iter().enumerate() {
        stmt.execute(params![
            thread_id.0.as_str(),
            position as i64,
            message.from,
            message.to,
            message.subject,
        ])?;
    }

    Ok(())
}

/// Lists inbox thread IDs in insertion order.
pub fn get_inbox(conn: &Connection) -> Result<Vec<ThreadId>> {
    let mut stmt = conn.prepare("SELECT id FROM threads WHERE in_inbox = 1 ORDER BY position")?;
    let ids = stmt.query_map([], |row| Ok(ThreadId::from(row.get::<_, String>(0)?)))?;
    ids.collect()
}

/// Removes a thread from the inbox without deleting it.
pub fn archive(conn: &Connection, thread_id: &ThreadId) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE threads SET in_inbox = 0 WHERE id = ?1",
        params![thread_id.0.as_str()],
    )?;
    Ok(changed > 0)
}

/// Checks whether a thread exists.
pub fn exists(conn: &Connection, thread_id: &ThreadId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM threads WHERE id = ?1)",
        params![thread_id.0.as_str()],
        |row| row.get(0),
    )
}

/// Gets a thread's messages, oldest first.
pub fn get_messages(conn: &Connection, thread_id: &ThreadId) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(
        "SELECT from_header, to_header, subject FROM messages
         WHERE thread_id = ?1 ORDER BY position",
    )?;
    let messages = stmt.query_map(params![thread_id.0.as_str()], |row| {
        Ok(Message {
            from: row.get(0)?,
            to: row.get(1)?,
            subject: row.get(2)?,
        })
    })?;
    messages.collect()
}

/// Gets the subject of a thread's first message.
pub fn get_first_subject(conn: &Connection, thread_id: &ThreadId) -> Result<Option<String>> {
    conn.query_row(
        "SELECT subject FROM messages WHERE thread_id = ?1 ORDER BY position LIMIT 1",
        params![thread_id.0.as_str()],
        |row| row.get(0),
    )
    .optional()
}
