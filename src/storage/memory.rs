//! In-memory mailbox.
//!
//! Useful for tests, fixtures and dry runs against a JSON snapshot. All
//! handles share one state, so labels added through a thread handle are
//! visible through the mailbox and every other handle.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::domain::{Label, LabelId, Message, ThreadId};
use crate::providers::{LabelStore, MailThread, Mailbox, Result, StoreError};

/// Serializable picture of a mailbox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailboxSnapshot {
    /// Names of labels that exist in the store.
    pub labels: Vec<String>,
    /// Inbox threads, in inbox order.
    pub threads: Vec<ThreadSnapshot>,
}

/// Serializable picture of one thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadSnapshot {
    /// Thread identifier.
    pub id: String,
    /// Names of labels applied to the thread.
    pub labels: Vec<String>,
    /// Messages, oldest first.
    pub messages: Vec<Message>,
}

#[derive(Debug, Default)]
struct State {
    labels: Vec<Label>,
    inbox: Vec<ThreadId>,
    messages: HashMap<ThreadId, Vec<Message>>,
    thread_labels: HashMap<ThreadId, Vec<LabelId>>,
    failing: HashSet<ThreadId>,
}

impl State {
    fn label_by_name(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.name == name)
    }

    fn ensure_label(&mut self, name: &str) -> LabelId {
        if let Some(label) = self.label_by_name(name) {
            return label.id.clone();
        }
        let label = Label::new(LabelId::generate(), name);
        let id = label.id.clone();
        self.labels.push(label);
        id
    }

    fn check_thread(&self, thread_id: &ThreadId) -> Result<()> {
        if self.failing.contains(thread_id) {
            return Err(StoreError::Unavailable(format!(
                "thread {thread_id} is unavailable"
            )));
        }
        if !self.messages.contains_key(thread_id) {
            return Err(StoreError::NotFound(format!("thread {thread_id}")));
        }
        Ok(())
    }
}

/// A mailbox held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailbox {
    state: Arc<RwLock<State>>,
}

impl InMemoryMailbox {
    /// Creates an empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mailbox from a snapshot.
    ///
    /// Thread labels that are not listed among the store labels are added to
    /// the store as well.
    pub fn from_snapshot(snapshot: MailboxSnapshot) -> Self {
        let mut state = State::default();
        for name in &snapshot.labels {
            state.ensure_label(name);
        }
        for thread in snapshot.threads {
            let id = ThreadId::from(thread.id);
            let label_ids: Vec<LabelId> = thread
                .labels
                .iter()
                .map(|name| state.ensure_label(name))
                .collect();
            state.inbox.push(id.clone());
            state.messages.insert(id.clone(), thread.messages);
            state.thread_labels.insert(id, label_ids);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Parses a JSON snapshot into a mailbox.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?))
    }

    /// Serializes the current state as a pretty-printed JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.snapshot()?)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    /// Captures the current state as a snapshot of the inbox.
    pub fn snapshot(&self) -> Result<MailboxSnapshot> {
        let state = self.read()?;
        let name_of = |id: &LabelId| {
            state
                .labels
                .iter()
                .find(|l| &l.id == id)
                .map(|l| l.name.clone())
        };

        let threads = state
            .inbox
            .iter()
            .map(|id| ThreadSnapshot {
                id: id.0.clone(),
                labels: state
                    .thread_labels
                    .get(id)
                    .map(|ids| ids.iter().filter_map(name_of).collect())
                    .unwrap_or_default(),
                messages: state.messages.get(id).cloned().unwrap_or_default(),
            })
            .collect();

        Ok(MailboxSnapshot {
            labels: state.labels.iter().map(|l| l.name.clone()).collect(),
            threads,
        })
    }

    /// Adds a thread with its messages to the end of the inbox.
    pub fn insert_thread(
        &self,
        thread_id: impl Into<ThreadId>,
        messages: Vec<Message>,
    ) -> Result<()> {
        let thread_id = thread_id.into();
        let mut state = self.write()?;
        if state.messages.contains_key(&thread_id) {
            return Err(StoreError::Storage(format!(
                "thread {thread_id} already exists"
            )));
        }
        state.inbox.push(thread_id.clone());
        state.messages.insert(thread_id.clone(), messages);
        state.thread_labels.insert(thread_id, Vec::new());
        Ok(())
    }

    /// Removes a thread from the inbox.
    pub fn archive(&self, thread_id: &ThreadId) -> Result<()> {
        let mut state = self.write()?;
        let before = state.inbox.len();
        state.inbox.retain(|id| id != thread_id);
        if state.inbox.len() == before {
            return Err(StoreError::NotFound(format!("thread {thread_id}")));
        }
        Ok(())
    }

    /// Makes every operation on the given thread fail with
    /// [`StoreError::Unavailable`].
    pub fn fail_thread(&self, thread_id: impl Into<ThreadId>) -> Result<()> {
        self.write()?.failing.insert(thread_id.into());
        Ok(())
    }

    /// Lists every label in the store, in creation order.
    pub fn labels(&self) -> Result<Vec<Label>> {
        Ok(self.read()?.labels.clone())
    }

    /// Returns a handle to a thread by ID.
    pub fn thread(&self, thread_id: &ThreadId) -> Result<InMemoryThread> {
        if !self.read()?.messages.contains_key(thread_id) {
            return Err(StoreError::NotFound(format!("thread {thread_id}")));
        }
        Ok(InMemoryThread {
            id: thread_id.clone(),
            state: Arc::clone(&self.state),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        read_state(&self.state)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        write_state(&self.state)
    }
}

fn read_state(state: &RwLock<State>) -> Result<RwLockReadGuard<'_, State>> {
    state
        .read()
        .map_err(|_| StoreError::Storage("mailbox lock poisoned".to_string()))
}

fn write_state(state: &RwLock<State>) -> Result<RwLockWriteGuard<'_, State>> {
    state
        .write()
        .map_err(|_| StoreError::Storage("mailbox lock poisoned".to_string()))
}

impl LabelStore for InMemoryMailbox {
    fn find_label_by_name(&self, name: &str) -> Result<Option<Label>> {
        Ok(self.read()?.label_by_name(name).cloned())
    }

    fn create_label(&self, name: &str) -> Result<Label> {
        let mut state = self.write()?;
        if state.label_by_name(name).is_some() {
            return Err(StoreError::Storage(format!("label {name} already exists")));
        }
        let label = Label::new(LabelId::generate(), name);
        state.labels.push(label.clone());
        Ok(label)
    }
}

impl Mailbox for InMemoryMailbox {
    type Thread = InMemoryThread;

    fn inbox_threads(&self) -> Result<Vec<InMemoryThread>> {
        Ok(self
            .read()?
            .inbox
            .iter()
            .map(|id| InMemoryThread {
                id: id.clone(),
                state: Arc::clone(&self.state),
            })
            .collect())
    }
}

/// A thread handle into an [`InMemoryMailbox`].
#[derive(Debug, Clone)]
pub struct InMemoryThread {
    id: ThreadId,
    state: Arc<RwLock<State>>,
}

impl MailThread for InMemoryThread {
    type Message = Message;

    fn id(&self) -> ThreadId {
        self.id.clone()
    }

    fn messages(&self) -> Result<Vec<Message>> {
        let state = read_state(&self.state)?;
        state.check_thread(&self.id)?;
        Ok(state.messages.get(&self.id).cloned().unwrap_or_default())
    }

    fn current_labels(&self) -> Result<Vec<Label>> {
        let state = read_state(&self.state)?;
        state.check_thread(&self.id)?;
        let ids = state.thread_labels.get(&self.id).cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| state.labels.iter().find(|l| &l.id == id).cloned())
            .collect())
    }

    fn add_label(&self, label: &Label) -> Result<()> {
        let mut state = write_state(&self.state)?;
        state.check_thread(&self.id)?;
        if !state.labels.iter().any(|l| l.id == label.id) {
            return Err(StoreError::NotFound(format!("label {}", label.name)));
        }
        let applied = state.thread_labels.entry(self.id.clone()).or_default();
        if !applied.contains(&label.id) {
            applied.push(label.id.clone());
        }
        Ok(())
    }

    fn first_message_subject(&self) -> Result<String> {
        let state = read_state(&self.state)?;
        state.check_thread(&self.id)?;
        Ok(state
            .messages
            .get(&self.id)
            .and_then(|messages| messages.first())
            .map(|m| m.subject.clone())
            .unwrap_or_default())
    }
}
