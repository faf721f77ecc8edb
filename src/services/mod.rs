//! Labeling services.
//!
//! Services sit between the entry point and the mailbox providers:
//!
//! ```text
//! Entry point (main)
//!          |
//!          v
//!    Services Layer  <-- You are here
//!          |
//!          v
//! Providers (Mailbox, LabelStore) -> Storage backends
//! ```
//!
//! - [`ThreadLabeler`]: decides which labels a thread gets and applies them
//! - [`LabelResolver`]: maps decoded label paths to store labels

mod label_resolver;
mod thread_labeler;

pub use label_resolver::LabelResolver;
pub use thread_labeler::{
    AppliedLabels, LabelingReport, ThreadFailure, ThreadLabeler, ThreadOutcome,
};
