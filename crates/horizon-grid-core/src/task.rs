//! Deferred task queue.
//!
//! Work that must run after the current synchronous call completes (auto-size
//! passes, redraw requests) is posted here and drained later by the owner.
//! Tasks are plain values; the owner decides how to execute them, which keeps
//! the queue free of borrowed state.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

struct TaskData<T> {
    id: TaskId,
    task: T,
}

/// A FIFO queue of deferred tasks.
pub struct TaskQueue<T> {
    tasks: VecDeque<TaskData<T>>,
}

impl<T> TaskQueue<T> {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Post a task to be executed later.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post(&mut self, task: T) -> TaskId {
        let id = next_task_id();
        self.tasks.push_back(TaskData { id, task });
        tracing::trace!(target: targets::TASK, task_id = id.as_u64(), "task posted");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was still pending and has been removed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(pos) => {
                self.tasks.remove(pos);
                tracing::trace!(target: targets::TASK, task_id = id.as_u64(), "task cancelled");
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the task has been posted and not yet run or cancelled.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Iterate over pending tasks in execution order.
    pub fn pending(&self) -> impl Iterator<Item = &T> + '_ {
        self.tasks.iter().map(|t| &t.task)
    }

    /// Remove and return every pending task in execution order.
    pub fn drain(&mut self) -> Vec<T> {
        self.tasks.drain(..).map(|t| t.task).collect()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
