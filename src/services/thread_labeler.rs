//! Thread labeling from plus-addressed recipients.
//!
//! The [`ThreadLabeler`] looks at the first message of each inbox thread,
//! decodes the recipient's subroute into label names, resolves them against
//! the label store and adds the ones the thread does not have yet.
//!
//! Only senders from a trusted domain may cause labels to be created. Mail
//! from anyone else can only attach labels that already exist.
//!
//! Only message index 0 is ever inspected. If its From or To header is
//! empty the thread is skipped even when a later message would qualify.

use std::fmt;

use crate::config::{LabelingSettings, TrustedDomains};
use crate::domain::{decode, extract_address, get_subroute, parse_address, Label, ThreadId};
use crate::providers::{MailMessage, MailThread, Mailbox, Result, StoreError};

use super::label_resolver::LabelResolver;

/// What happened to one thread.
#[derive(Debug, Clone)]
pub enum ThreadOutcome {
    /// The thread has no messages.
    NoMessages,
    /// The first message lacks a sender or recipient address.
    MissingAddresses,
    /// Every resolved label is already on the thread.
    UpToDate,
    /// New labels were added (or would be, in dry-run mode).
    Labeled(AppliedLabels),
}

/// Labels added to a thread, with the context they were derived from.
#[derive(Debug, Clone)]
pub struct AppliedLabels {
    /// Thread the labels were added to.
    pub thread_id: ThreadId,
    /// Subject of the thread's first message.
    pub subject: String,
    /// Bare sender address of the first message.
    pub sender: String,
    /// Existing labels added, in subroute order.
    pub labels: Vec<Label>,
    /// Names of labels that do not exist yet and would be created.
    ///
    /// Only a dry run fills this in; a real run creates them and lists them
    /// in `labels`.
    pub pending: Vec<String>,
    /// True if nothing was written to the thread or the store.
    pub dry_run: bool,
}

impl AppliedLabels {
    /// Names of every label in this set, existing ones first.
    pub fn names(&self) -> Vec<&str> {
        self.labels
            .iter()
            .map(|l| l.name.as_str())
            .chain(self.pending.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for AppliedLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Would add" } else { "Added" };
        write!(
            f,
            "{} labels [{}] to thread {} (\"{}\" from {})",
            verb,
            self.names().join(", "),
            self.thread_id,
            self.subject,
            self.sender
        )
    }
}

/// A thread that could not be processed.
#[derive(Debug)]
pub struct ThreadFailure {
    /// Thread that failed.
    pub thread_id: ThreadId,
    /// The store error that stopped it.
    pub error: StoreError,
}

/// Result of a labeling run over the inbox.
#[derive(Debug, Default)]
pub struct LabelingReport {
    /// Number of threads examined.
    pub threads_examined: usize,
    /// Threads that received new labels.
    pub applied: Vec<AppliedLabels>,
    /// Threads that failed (non-fatal).
    pub failures: Vec<ThreadFailure>,
}

impl LabelingReport {
    /// Returns true if no thread failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of labels added (or, in a dry run, that would be)
    /// across all threads.
    pub fn labels_applied(&self) -> usize {
        self.applied.iter().map(|a| a.names().len()).sum()
    }
}

/// Applies subroute-derived labels to mailbox threads.
///
/// # Example
///
/// ```ignore
/// let labeler = ThreadLabeler::new(settings.labeling);
/// let report = labeler.run(&mailbox)?;
/// for applied in &report.applied {
///     println!("{applied}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ThreadLabeler {
    trusted_domains: TrustedDomains,
    dry_run: bool,
}

impl ThreadLabeler {
    /// Creates a labeler from labeling settings.
    pub fn new(settings: LabelingSettings) -> Self {
        Self {
            trusted_domains: settings.trusted_domains,
            dry_run: settings.dry_run,
        }
    }

    /// Creates a labeler that trusts the given domains and applies labels.
    pub fn with_trusted_domains(trusted_domains: TrustedDomains) -> Self {
        Self {
            trusted_domains,
            dry_run: false,
        }
    }

    /// Returns true if mail from `sender` may create labels.
    pub fn is_trusted_sender(&self, sender: &str) -> bool {
        self.trusted_domains.contains(parse_address(sender).domain)
    }

    /// Labels every inbox thread.
    ///
    /// A failure on one thread is logged and recorded in the report; the
    /// remaining threads are still processed. Only failing to list the inbox
    /// aborts the run.
    pub fn run<M: Mailbox>(&self, mailbox: &M) -> Result<LabelingReport> {
        let threads = mailbox.inbox_threads()?;
        let mut report = LabelingReport::default();

        for thread in &threads {
            report.threads_examined += 1;
            match self.label_thread(mailbox, thread) {
                Ok(ThreadOutcome::Labeled(applied)) => {
                    tracing::info!("{}", applied);
                    report.applied.push(applied);
                }
                Ok(outcome) => {
                    tracing::debug!(thread_id = %thread.id(), ?outcome, "No labels added");
                }
                Err(error) => {
                    tracing::warn!(thread_id = %thread.id(), %error, "Failed to label thread");
                    report.failures.push(ThreadFailure {
                        thread_id: thread.id(),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Labels one thread from its first message.
    ///
    /// Everything the outcome reports is read before the first write, so an
    /// error never leaves labels on a thread that is reported as failed. In
    /// dry-run mode nothing is created or added; labels a trusted sender
    /// would create are reported as pending.
    pub fn label_thread<M, T>(&self, mailbox: &M, thread: &T) -> Result<ThreadOutcome>
    where
        M: Mailbox + ?Sized,
        T: MailThread,
    {
        let messages = thread.messages()?;
        let Some(first) = messages.first() else {
            return Ok(ThreadOutcome::NoMessages);
        };

        let sender = extract_address(first.from_header());
        let recipient = extract_address(first.to_header());
        if sender.is_empty() || recipient.is_empty() {
            return Ok(ThreadOutcome::MissingAddresses);
        }

        let subroute = get_subroute(recipient);
        let paths = decode(&subroute);
        let trusted = self.is_trusted_sender(sender);
        tracing::debug!(
            thread_id = %thread.id(),
            %subroute,
            direct = subroute.is_direct(),
            ?paths,
            trusted,
            "Decoded recipient subroute"
        );
        for path in paths.iter().filter(|p| p.has_empty_segment()) {
            tracing::debug!(
                thread_id = %thread.id(),
                label = %path,
                "Label path has an empty segment"
            );
        }

        let resolver = LabelResolver::new(mailbox);
        let mut resolved = Vec::with_capacity(paths.len());
        let mut pending: Vec<String> = Vec::new();
        if self.dry_run {
            for path in &paths {
                match resolver.resolve_label(path, false)? {
                    Some(label) => resolved.push(label),
                    None if trusted && !pending.iter().any(|p| p == path.as_str()) => {
                        pending.push(path.to_string());
                    }
                    None => {}
                }
            }
        } else {
            resolved = resolver.resolve_all(&paths, trusted)?;
        }

        let current = thread.current_labels()?;
        let mut missing: Vec<Label> = Vec::new();
        for label in resolved {
            let present = current.iter().chain(missing.iter()).any(|l| l.same_name(&label));
            if !present {
                missing.push(label);
            }
        }

        if missing.is_empty() && pending.is_empty() {
            return Ok(ThreadOutcome::UpToDate);
        }

        let subject = thread.first_message_subject()?;
        if !self.dry_run {
            for label in &missing {
                thread.add_label(label)?;
            }
        }

        Ok(ThreadOutcome::Labeled(AppliedLabels {
            thread_id: thread.id(),
            subject,
            sender: sender.to_string(),
            labels: missing,
            pending,
            dry_run: self.dry_run,
        }))
    }
}
