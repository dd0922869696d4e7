//! In-memory label sets with optimistic background persistence.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

use super::store::LabelSetStore;
use crate::model::{LabelItem, LabelSet, LabelSetPatch};

/// Which store call a persistence event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOp {
    Put,
    Delete,
}

/// Outcome of a background write that the host may want to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceEvent {
    /// A write failed. The in-memory state was kept.
    Failed {
        label_set_id: String,
        op: PersistenceOp,
        error: String,
    },
}

/// Work queued for the persistence worker.
enum Command {
    Put(LabelSet),
    Delete(String),
    /// Answered once every command queued before it has been applied
    Flush(oneshot::Sender<()>),
}

/// The user's label sets.
///
/// Mutations update memory first and return immediately. The matching store
/// calls are queued to a single worker task on the runtime the library was
/// created with, which applies them in the order they were issued. Failures
/// are logged and sent on the event channel returned by [`LabelLibrary::new`].
pub struct LabelLibrary {
    sets: Vec<LabelSet>,
    initialized: bool,
    store: Arc<dyn LabelSetStore>,
    commands: UnboundedSender<Command>,
}

impl LabelLibrary {
    /// Create an empty library and the receiver for its persistence events.
    pub fn new(
        store: Arc<dyn LabelSetStore>,
        runtime: Handle,
    ) -> (Self, UnboundedReceiver<PersistenceEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let (commands, queue) = mpsc::unbounded_channel();
        runtime.spawn(run_worker(Arc::clone(&store), queue, events));

        let library = Self {
            sets: Vec::new(),
            initialized: false,
            store,
            commands,
        };
        (library, receiver)
    }

    /// Load every stored set.
    ///
    /// A failing store is logged and leaves the library empty. Either way the
    /// library is marked initialized.
    pub async fn init(&mut self) {
        match self.store.get_all().await {
            Ok(sets) => {
                log::info!("Loaded {} label sets", sets.len());
                if !sets.is_empty() {
                    self.sets = sets;
                }
            }
            Err(e) => log::error!("Failed to load label sets: {}", e),
        }
        self.initialized = true;
    }

    /// Whether [`init`](Self::init) has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// All label sets in insertion order.
    pub fn label_sets(&self) -> &[LabelSet] {
        &self.sets
    }

    /// Look up a set by id.
    pub fn get(&self, id: &str) -> Option<&LabelSet> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// Create a set with a fresh id and return a copy of it.
    pub fn add_label_set(
        &mut self,
        name: impl Into<String>,
        preset_image: Option<String>,
        labels: Vec<LabelItem>,
    ) -> LabelSet {
        let set = LabelSet {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            preset_image,
            labels,
        };
        log::debug!("Added label set {} ({})", set.id, set.name);

        self.sets.push(set.clone());
        self.enqueue(Command::Put(set.clone()));
        set
    }

    /// Shallow-merge `patch` into the set with `id`.
    ///
    /// Returns false and persists nothing when the id is unknown.
    pub fn update_label_set(&mut self, id: &str, patch: LabelSetPatch) -> bool {
        let Some(set) = self.sets.iter_mut().find(|s| s.id == id) else {
            log::debug!("Ignoring update of unknown label set {}", id);
            return false;
        };
        set.apply(patch);
        let updated = set.clone();
        self.enqueue(Command::Put(updated));
        true
    }

    /// Remove the set with `id`.
    ///
    /// The store delete is issued even when the id is not held in memory.
    /// Returns whether a set was removed from memory.
    pub fn delete_label_set(&mut self, id: &str) -> bool {
        let before = self.sets.len();
        self.sets.retain(|s| s.id != id);
        self.enqueue(Command::Delete(id.to_string()));
        self.sets.len() != before
    }

    /// Wait until every write issued so far has reached the store.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        self.enqueue(Command::Flush(done));
        if wait.await.is_err() {
            log::error!("Label set worker stopped before flushing");
        }
    }

    fn enqueue(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::error!("Label set worker is gone; write dropped");
        }
    }
}

/// Apply queued store calls one at a time, in order.
async fn run_worker(
    store: Arc<dyn LabelSetStore>,
    mut queue: UnboundedReceiver<Command>,
    events: UnboundedSender<PersistenceEvent>,
) {
    while let Some(command) = queue.recv().await {
        match command {
            Command::Put(set) => {
                let id = set.id.clone();
                if let Err(e) = store.put(set).await {
                    report_failure(&events, id, PersistenceOp::Put, e.to_string());
                }
            }
            Command::Delete(id) => {
                if let Err(e) = store.delete(&id).await {
                    report_failure(&events, id, PersistenceOp::Delete, e.to_string());
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    log::debug!("Label set worker finished");
}

fn report_failure(
    events: &UnboundedSender<PersistenceEvent>,
    label_set_id: String,
    op: PersistenceOp,
    error: String,
) {
    log::warn!(
        "Failed to persist label set {} ({:?}): {}",
        label_set_id,
        op,
        error
    );
    // a dropped receiver just means nobody is listening
    let _ = events.send(PersistenceEvent::Failed {
        label_set_id,
        op,
        error,
    });
}
