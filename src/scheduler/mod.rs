use std::fmt;
use std::time::Duration;

mod manual;

pub use manual::ManualScheduler;

pub type OnceTask = Box<dyn FnOnce()>;
pub type RepeatingTask = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Owner of one scheduled task. Cancels the task when cancelled or dropped;
/// cancelling a task that already ran is a no-op.
pub struct TaskHandle {
    id: TaskId,
    canceller: Option<Box<dyn FnOnce(TaskId)>>,
}

impl TaskHandle {
    pub fn new(id: TaskId, canceller: impl FnOnce(TaskId) + 'static) -> Self {
        Self {
            id,
            canceller: Some(Box::new(canceller)),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(canceller) = self.canceller.take() {
            tracing::trace!(task = self.id.raw(), "cancel scheduled task");
            canceller(self.id);
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("armed", &self.canceller.is_some())
            .finish()
    }
}

/// Single-threaded timer and frame-callback source.
pub trait Scheduler {
    fn schedule_once(&self, delay: Duration, task: OnceTask) -> TaskHandle;

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TaskHandle;

    /// Run `task` once before the next frame is drawn.
    fn request_frame(&self, task: OnceTask) -> TaskHandle;
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn dropping_a_handle_runs_its_canceller_once() {
        let cancelled = Rc::new(Cell::new(0));
        let counter = cancelled.clone();
        let handle = TaskHandle::new(TaskId::new(3), move |id| {
            assert_eq!(id, TaskId::new(3));
            counter.set(counter.get() + 1);
        });
        drop(handle);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn explicit_cancel_does_not_fire_again_on_drop() {
        let cancelled = Rc::new(Cell::new(0));
        let counter = cancelled.clone();
        let handle = TaskHandle::new(TaskId::new(1), move |_| counter.set(counter.get() + 1));
        handle.cancel();
        assert_eq!(cancelled.get(), 1);
    }
}
