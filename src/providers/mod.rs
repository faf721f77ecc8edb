//! Mailbox provider abstraction.
//!
//! This module contains the capability traits a mailbox backend must
//! implement for the labeler to run against it:
//!
//! - [`LabelStore`] - finding and creating labels by name
//! - [`Mailbox`] - listing inbox threads
//! - [`MailThread`] - reading a thread's messages and labels, adding labels
//! - [`MailMessage`] - reading From/To headers
//!
//! Concrete backends live in [`crate::storage`].

mod mailbox;

pub use mailbox::{LabelStore, MailMessage, MailThread, Mailbox, Result, StoreError};

#[cfg(test)]
pub use mailbox::MockLabelStore;
