//! In-memory task store.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::interfaces::{TaskStatus, TaskStore};
use crate::task::TaskId;

/// Tasks retained by [`InMemoryTaskStore::new`].
pub const DEFAULT_TASK_CAPACITY: usize = 10_000;

/// Bounded task store; state lives as long as the process or until evicted.
///
/// When full, inserting a new task evicts the least recently used finished
/// task. Only when every retained task is still live does the least recently
/// used live task go.
pub struct InMemoryTaskStore {
    tasks: Mutex<LruCache<TaskId, TaskStatus>>,
}

impl InMemoryTaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TASK_CAPACITY)
    }

    /// Store retaining at most `capacity` tasks (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tasks: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Maximum number of retained tasks.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tasks.lock().cap().get()
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn put(&self, id: TaskId, status: TaskStatus) {
        let mut tasks = self.tasks.lock();
        if !tasks.contains(&id) && tasks.len() == tasks.cap().get() {
            let finished = tasks
                .iter()
                .rev()
                .find(|(_, status)| status.is_terminal())
                .map(|(id, _)| *id);
            if let Some(evicted) = finished {
                tasks.pop(&evicted);
                debug!(task = %evicted, "Evicted finished task");
            }
        }
        tasks.put(id, status);
    }

    fn get(&self, id: &TaskId) -> Option<TaskStatus> {
        self.tasks.lock().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.tasks.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::TaskState;

    #[test]
    fn put_then_get() {
        let store = InMemoryTaskStore::new();
        let id = TaskId::new();
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());

        store.put(id, TaskStatus::pending());
        store.put(id, TaskStatus::progress(0.75));

        let status = store.get(&id).unwrap();
        assert_eq!(status.state, TaskState::Progress);
        assert!((status.progress - 0.75).abs() < f64::EPSILON);
        assert_eq!(store.len(), 1);
        assert_eq!(store.capacity(), DEFAULT_TASK_CAPACITY);
    }

    #[test]
    fn tasks_are_independent() {
        let store = InMemoryTaskStore::new();
        let a = TaskId::new();
        let b = TaskId::new();
        store.put(a, TaskStatus::success("3.1".into()));
        store.put(b, TaskStatus::pending());
        assert_eq!(store.get(&a).unwrap().state, TaskState::Success);
        assert_eq!(store.get(&b).unwrap().state, TaskState::Pending);
    }

    #[test]
    fn full_store_evicts_oldest_finished_task() {
        let store = InMemoryTaskStore::with_capacity(2);
        let first = TaskId::new();
        let second = TaskId::new();
        let third = TaskId::new();
        store.put(first, TaskStatus::success("3.1".into()));
        store.put(second, TaskStatus::failure(0.5, "cancelled".into()));
        store.put(third, TaskStatus::pending());

        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_none());
        assert!(store.get(&second).is_some());
        assert!(store.get(&third).is_some());
    }

    #[test]
    fn live_tasks_outlast_finished_ones() {
        let store = InMemoryTaskStore::with_capacity(2);
        let running = TaskId::new();
        let finished = TaskId::new();
        store.put(running, TaskStatus::progress(0.25));
        store.put(finished, TaskStatus::success("3.14".into()));
        store.put(TaskId::new(), TaskStatus::pending());

        assert!(store.get(&finished).is_none());
        assert_eq!(store.get(&running).unwrap().state, TaskState::Progress);
    }

    #[test]
    fn updates_do_not_evict() {
        let store = InMemoryTaskStore::with_capacity(1);
        let id = TaskId::new();
        store.put(id, TaskStatus::pending());
        store.put(id, TaskStatus::success("3.14".into()));
        assert_eq!(store.get(&id).unwrap().state, TaskState::Success);
    }

    #[test]
    fn zero_capacity_keeps_one_task() {
        assert_eq!(InMemoryTaskStore::with_capacity(0).capacity(), 1);
    }
}
