//! sublabel - Derives mailbox labels from plus-addressed recipients
//!
//! Mail sent to `jonathan+abc.def+foo_bar@example.com` carries a routing tag
//! after the first `+`. This crate decodes that tag into the hierarchical
//! labels `Abc/Def` and `Foo Bar` and applies them to the message's thread,
//! creating missing labels only for senders from trusted domains.

pub mod config;
pub mod domain;
pub mod providers;
pub mod services;
pub mod storage;

pub use services::{LabelingReport, ThreadLabeler};
