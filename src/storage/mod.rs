//! Mailbox storage backends.
//!
//! This module provides concrete [`Mailbox`](crate::providers::Mailbox)
//! implementations:
//!
//! - [`SqliteMailbox`] - a local SQLite database, used by the binary
//! - [`InMemoryMailbox`] - shared in-memory state, loadable from JSON snapshots

mod database;
mod memory;
pub mod queries;
mod schema;
mod sqlite;

pub use database::{Database, DatabaseError, Result};
pub use memory::{InMemoryMailbox, InMemoryThread, MailboxSnapshot, ThreadSnapshot};
pub use sqlite::{SqliteMailbox, SqliteThread};
