//! Mailbox capability traits.
//!
//! The labeler never talks to a concrete mail backend. It sees a mailbox
//! only through the traits in this module, each carrying the minimal set of
//! operations labeling needs. Every operation may fail with a
//! [`StoreError`]; callers decide how far a failure propagates.

use crate::domain::{Label, Message, ThreadId};

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while talking to the mailbox store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Requested thread or label does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store refused the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The store could not be reached or is over quota.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backend storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Looking up and creating labels by full name.
#[cfg_attr(test, mockall::automock)]
pub trait LabelStore {
    /// Finds a label by its exact hierarchical name.
    fn find_label_by_name(&self, name: &str) -> Result<Option<Label>>;

    /// Creates a label with the given name and returns it.
    fn create_label(&self, name: &str) -> Result<Label>;
}

/// Read access to one message's address headers.
pub trait MailMessage {
    /// Raw From header.
    fn from_header(&self) -> &str;

    /// Raw To header.
    fn to_header(&self) -> &str;
}

impl MailMessage for Message {
    fn from_header(&self) -> &str {
        &self.from
    }

    fn to_header(&self) -> &str {
        &self.to
    }
}

/// A conversation thread in the mailbox.
pub trait MailThread {
    /// Message handle type yielded by [`MailThread::messages`].
    type Message: MailMessage;

    /// Returns the thread identifier.
    fn id(&self) -> ThreadId;

    /// Returns the thread's messages, oldest first.
    fn messages(&self) -> Result<Vec<Self::Message>>;

    /// Returns the labels currently applied to the thread.
    fn current_labels(&self) -> Result<Vec<Label>>;

    /// Applies a label to the thread.
    fn add_label(&self, label: &Label) -> Result<()>;

    /// Returns the subject of the thread's first message.
    fn first_message_subject(&self) -> Result<String>;
}

/// A mailbox: a label store plus an inbox of threads.
pub trait Mailbox: LabelStore {
    /// Thread handle type yielded by [`Mailbox::inbox_threads`].
    type Thread: MailThread;

    /// Lists the threads currently in the inbox.
    fn inbox_threads(&self) -> Result<Vec<Self::Thread>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_headers() {
        let msg = Message::new("\"J\" <j@bswck.dev>", "casino+x@gmail.com", "Hi");
        assert_eq!(msg.from_header(), "\"J\" <j@bswck.dev>");
        assert_eq!(msg.to_header(), "casino+x@gmail.com");
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "store unavailable: quota exceeded");
    }
}
