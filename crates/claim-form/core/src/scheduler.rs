//! One-shot hide tasks for the success message

use std::time::Duration;

use tracing::trace;

use crate::binding::UiBinding;

/// Schedules the delayed hide of a feedback node.
///
/// Each task is keyed to one node and can be cancelled through its handle
/// before it fires.
pub trait HideScheduler<N> {
    type Handle;

    /// Hide `node` once `after` has elapsed
    fn schedule_hide(&mut self, node: N, after: Duration) -> Self::Handle;

    /// Drop a pending task; cancelling a task that already fired is a no-op
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct PendingHide<N> {
    id: TaskId,
    due: Duration,
    node: N,
}

/// Simulated clock driving hide tasks in tests
#[derive(Debug)]
pub struct ManualScheduler<N> {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingHide<N>>,
}

impl<N> Default for ManualScheduler<N> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<N: Clone> ManualScheduler<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|task| task.id == id)
    }

    /// Move the clock forward and run every task that came due, earliest first.
    ///
    /// Returns the nodes that were hidden.
    pub fn advance<U>(&mut self, ui: &mut U, by: Duration) -> Vec<N>
    where
        U: UiBinding<Node = N>,
    {
        self.now += by;

        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= self.now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|task| (task.due, task.id.0));

        due.into_iter()
            .map(|task| {
                trace!(task = task.id.0, "hide task fired");
                ui.set_visible(&task.node, false);
                task.node
            })
            .collect()
    }
}

impl<N: Clone> HideScheduler<N> for ManualScheduler<N> {
    type Handle = TaskId;

    fn schedule_hide(&mut self, node: N, after: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingHide {
            id,
            due: self.now + after,
            node,
        });
        trace!(task = id.0, delay_ms = after.as_millis() as u64, "hide task scheduled");
        id
    }

    fn cancel(&mut self, handle: TaskId) {
        let before = self.pending.len();
        self.pending.retain(|task| task.id != handle);
        if self.pending.len() != before {
            trace!(task = handle.0, "hide task cancelled");
        }
    }
}
