//! Deferred Tasks
//!
//! Continuations that run on the next scheduling turn, after the current
//! mutation batch has settled. Hosts call `run_pending` once per turn.

use std::collections::VecDeque;

use crate::isolation::FocusSink;

/// Handle for cancelling a queued task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Work that waits for the next turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask<N> {
    /// Move input focus to the node
    Focus(N),
}

/// FIFO queue of deferred tasks
#[derive(Debug)]
pub struct Scheduler<N> {
    next_handle: u64,
    queue: VecDeque<(TaskHandle, DeferredTask<N>)>,
}

impl<N> Default for Scheduler<N> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            queue: VecDeque::new(),
        }
    }
}

impl<N: Copy + std::fmt::Debug> Scheduler<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next turn
    pub fn defer(&mut self, task: DeferredTask<N>) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.queue.push_back((handle, task));
        handle
    }

    /// Drop a queued task; false if it already ran or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|(h, _)| *h != handle);
        before != self.queue.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.queue.iter().any(|(h, _)| *h == handle)
    }

    /// Number of queued tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run every task queued so far, returning how many ran
    pub fn run_pending<H: FocusSink<Node = N>>(&mut self, host: &mut H) -> usize {
        let batch = std::mem::take(&mut self.queue);
        let count = batch.len();
        for (_, task) in batch {
            match task {
                DeferredTask::Focus(node) => {
                    if !host.is_attached(node) || !host.move_focus_to(node) {
                        tracing::debug!(node = ?node, "deferred focus dropped");
                    }
                }
            }
        }
        count
    }
}
