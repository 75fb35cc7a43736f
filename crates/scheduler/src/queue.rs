use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use shelf_core::DocumentPath;

use crate::error::SchedulerError;

/// One item on a worker queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Document(DocumentPath),
    /// No more work will be enqueued after this.
    Stop,
}

/// FIFO owned by a single worker. The manager sends, the owning worker
/// receives; a pop blocks until an item is available.
#[derive(Debug)]
pub struct TaskQueue {
    tx: Sender<Task>,
    rx: Receiver<Task>,
    /// Queued `Task::Document` items.
    documents: AtomicUsize,
}

impl Default for TaskQueue {
    fn default() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            documents: AtomicUsize::new(0),
        }
    }
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: Task) -> Result<(), SchedulerError> {
        let is_document = matches!(task, Task::Document(_));
        if is_document {
            self.documents.fetch_add(1, Ordering::SeqCst);
        }
        self.tx.send(task).map_err(|_| {
            if is_document {
                self.documents.fetch_sub(1, Ordering::SeqCst);
            }
            SchedulerError::QueueDisconnected
        })
    }

    /// Block until an item is available, then take it.
    pub fn pop_blocking(&self) -> Result<Task, SchedulerError> {
        let task = self.rx.recv().map_err(|_| SchedulerError::QueueDisconnected)?;
        self.taken(&task);
        Ok(task)
    }

    pub fn try_pop(&self) -> Result<Option<Task>, SchedulerError> {
        match self.rx.try_recv() {
            Ok(task) => {
                self.taken(&task);
                Ok(Some(task))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SchedulerError::QueueDisconnected),
        }
    }

    fn taken(&self, task: &Task) {
        if let Task::Document(_) = task {
            self.documents.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Number of queued items, sentinel included.
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }

    /// Queued documents, sentinel excluded.
    pub fn pending_documents(&self) -> usize {
        self.documents.load(Ordering::SeqCst)
    }
}
