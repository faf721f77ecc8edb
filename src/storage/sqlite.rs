//! SQLite-backed mailbox.

use std::path::Path;

use crate::domain::{Label, LabelId, Message, ThreadId};
use crate::providers::{LabelStore, MailThread, Mailbox, Result, StoreError};

use super::database::{self, Database};
use super::queries::{labels, threads};

/// A mailbox persisted in a local SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteMailbox {
    db: Database,
}

impl SqliteMailbox {
    /// Opens (or creates) the mailbox database at `path`.
    pub fn open(path: impl AsRef<Path>) -> database::Result<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// Opens an in-memory mailbox.
    pub fn open_in_memory() -> database::Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    /// Adds a thread with its messages to the end of the inbox.
    pub fn insert_thread(&self, thread_id: &ThreadId, messages: &[Message]) -> Result<()> {
        self.db
            .transaction(|tx| Ok(threads::insert(tx, thread_id, messages)?))?;
        Ok(())
    }

    /// Removes a thread from the inbox.
    pub fn archive(&self, thread_id: &ThreadId) -> Result<()> {
        let archived = self.db.with_conn(|conn| Ok(threads::archive(conn, thread_id)?))?;
        if archived {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("thread {thread_id}")))
        }
    }

    /// Lists every label in the store, ordered by name.
    pub fn labels(&self) -> Result<Vec<Label>> {
        Ok(self.db.with_conn(|conn| Ok(labels::get_all(conn)?))?)
    }

    /// Returns a handle to a thread by ID.
    pub fn thread(&self, thread_id: &ThreadId) -> Result<SqliteThread> {
        let exists = self.db.with_conn(|conn| Ok(threads::exists(conn, thread_id)?))?;
        if !exists {
            return Err(StoreError::NotFound(format!("thread {thread_id}")));
        }
        Ok(SqliteThread {
            id: thread_id.clone(),
            db: self.db.clone(),
        })
    }
}

impl LabelStore for SqliteMailbox {
    fn find_label_by_name(&self, name: &str) -> Result<Option<Label>> {
        Ok(self.db.with_conn(|conn| Ok(labels::get_by_name(conn, name)?))?)
    }

    fn create_label(&self, name: &str) -> Result<Label> {
        let label = Label::new(LabelId::generate(), name);
        self.db.with_conn(|conn| Ok(labels::insert(conn, &label)?))?;
        Ok(label)
    }
}

impl Mailbox for SqliteMailbox {
    type Thread = SqliteThread;

    fn inbox_threads(&self) -> Result<Vec<SqliteThread>> {
        let ids = self.db.with_conn(|conn| Ok(threads::get_inbox(conn)?))?;
        Ok(ids
            .into_iter()
            .map(|id| SqliteThread {
                id,
                db: self.db.clone(),
            })
            .collect())
    }
}

/// A thread handle into a [`SqliteMailbox`].
#[derive(Debug, Clone)]
pub struct SqliteThread {
    id: ThreadId,
    db: Database,
}

impl MailThread for SqliteThread {
    type Message = Message;

    fn id(&self) -> ThreadId {
        self.id.clone()
    }

    fn messages(&self) -> Result<Vec<Message>> {
        Ok(self
            .db
            .with_conn(|conn| Ok(threads::get_messages(conn, &self.id)?))?)
    }

    fn current_labels(&self) -> Result<Vec<Label>> {
        Ok(self
            .db
            .with_conn(|conn| Ok(labels::get_for_thread(conn, &self.id)?))?)
    }

    fn add_label(&self, label: &Label) -> Result<()> {
        self.db
            .with_conn(|conn| Ok(labels::apply_to_thread(conn, &label.id, &self.id)?))?;
        Ok(())
    }

    fn first_message_subject(&self) -> Result<String> {
        let subject = self
            .db
            .with_conn(|conn| Ok(threads::get_first_subject(conn, &self.id)?))?;
        Ok(subject.unwrap_or_default())
    }
}
