use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{OnceTask, RepeatingTask, Scheduler, TaskHandle, TaskId};

const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

enum Job {
    Once(OnceTask),
    Repeating(RepeatingTask),
}

struct TimerEntry {
    id: TaskId,
    deadline: Duration,
    interval: Option<Duration>,
    // `None` while a repeating job is running.
    job: Option<Job>,
}

struct FrameEntry {
    id: TaskId,
    task: OnceTask,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_id: u64,
    timers: Vec<TimerEntry>,
    frames: Vec<FrameEntry>,
}

impl ManualQueue {
    fn allocate_id(&mut self) -> TaskId {
        self.next_id = self.next_id.wrapping_add(1);
        TaskId::new(self.next_id)
    }

    fn remove(&mut self, id: TaskId) -> (Option<TimerEntry>, Option<FrameEntry>) {
        let timer = self
            .timers
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| self.timers.remove(index));
        let frame = self
            .frames
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| self.frames.remove(index));
        (timer, frame)
    }

    fn take_due(&mut self, target: Duration) -> Option<(TaskId, Job)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.job.is_some() && entry.deadline <= target)
            .min_by_key(|(_, entry)| (entry.deadline, entry.id))
            .map(|(index, _)| index)?;

        let deadline = self.timers[index].deadline;
        if deadline > self.now {
            self.now = deadline;
        }
        match self.timers[index].interval {
            None => {
                let entry = self.timers.remove(index);
                entry.job.map(|job| (entry.id, job))
            }
            Some(interval) => {
                let entry = &mut self.timers[index];
                entry.deadline += interval;
                entry.job.take().map(|job| (entry.id, job))
            }
        }
    }
}

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing runs until the owner calls [`advance`](Self::advance) or
/// [`run_frame`](Self::run_frame). Callbacks run with no internal borrow held,
/// so they may schedule or cancel other tasks.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.queue.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.queue.borrow().frames.len()
    }

    /// Move the clock forward, running every timer that falls due in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let due = self.queue.borrow_mut().take_due(target);
            let Some((id, job)) = due else {
                break;
            };
            match job {
                Job::Once(task) => task(),
                Job::Repeating(mut task) => {
                    task();
                    let mut queue = self.queue.borrow_mut();
                    if let Some(entry) = queue.timers.iter_mut().find(|entry| entry.id == id) {
                        entry.job = Some(Job::Repeating(task));
                    }
                }
            }
        }
        let mut queue = self.queue.borrow_mut();
        if target > queue.now {
            queue.now = target;
        }
    }

    /// Run the frame callbacks requested before this call. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let ids: Vec<TaskId> = self
            .queue
            .borrow()
            .frames
            .iter()
            .map(|entry| entry.id)
            .collect();
        let mut ran = 0;
        for id in ids {
            let (_, frame) = self.queue.borrow_mut().remove(id);
            if let Some(frame) = frame {
                (frame.task)();
                ran += 1;
            }
        }
        ran
    }

    fn handle(&self, id: TaskId) -> TaskHandle {
        let queue: Weak<RefCell<ManualQueue>> = Rc::downgrade(&self.queue);
        TaskHandle::new(id, move |id| {
            let Some(queue) = queue.upgrade() else {
                return;
            };
            // Bind the removed entries so they drop after the borrow ends.
            let removed = queue.borrow_mut().remove(id);
            drop(removed);
        })
    }

    fn push_timer(&self, delay: Duration, interval: Option<Duration>, job: Job) -> TaskHandle {
        let id = {
            let mut queue = self.queue.borrow_mut();
            let id = queue.allocate_id();
            let deadline = queue.now + delay;
            queue.timers.push(TimerEntry {
                id,
                deadline,
                interval,
                job: Some(job),
            });
            id
        };
        self.handle(id)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: OnceTask) -> TaskHandle {
        self.push_timer(delay, None, Job::Once(task))
    }

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TaskHandle {
        let interval = interval.max(MIN_REPEAT_INTERVAL);
        self.push_timer(interval, Some(interval), Job::Repeating(task))
    }

    fn request_frame(&self, task: OnceTask) -> TaskHandle {
        let id = {
            let mut queue = self.queue.borrow_mut();
            let id = queue.allocate_id();
            queue.frames.push(FrameEntry { id, task });
            id
        };
        self.handle(id)
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("timers", &queue.timers.len())
            .field("frames", &queue.frames.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn once_task_runs_at_its_deadline() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let _handle = scheduler.schedule_once(ms(700), Box::new(move || flag.set(true)));

        scheduler.advance(ms(699));
        assert!(!fired.get());
        scheduler.advance(ms(1));
        assert!(fired.get());
        assert_eq!(scheduler.now(), ms(700));
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn repeating_task_runs_every_interval_until_cancelled() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let handle = scheduler.schedule_repeating(
            ms(1_000),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        scheduler.advance(ms(3_500));
        assert_eq!(count.get(), 3);

        handle.cancel();
        scheduler.advance(ms(5_000));
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn timers_fire_in_deadline_order_then_schedule_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut handles = Vec::new();
        for (label, delay) in [("b", 20), ("a", 10), ("c", 20)] {
            let order = order.clone();
            let task = Box::new(move || order.borrow_mut().push(label));
            handles.push(scheduler.schedule_once(ms(delay), task));
        }
        scheduler.advance(ms(50));
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn dropping_handle_cancels_pending_timer() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let handle = scheduler.schedule_once(ms(10), Box::new(move || flag.set(true)));
        drop(handle);
        scheduler.advance(ms(100));
        assert!(!fired.get());
    }

    #[test]
    fn frame_callbacks_requested_during_a_frame_wait_for_the_next_one() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let nested: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));

        let counter = count.clone();
        let inner_scheduler = scheduler.clone();
        let nested_slot = nested.clone();
        let _outer = scheduler.request_frame(Box::new(move || {
            counter.set(counter.get() + 1);
            let counter = counter.clone();
            let handle =
                inner_scheduler.request_frame(Box::new(move || counter.set(counter.get() + 1)));
            *nested_slot.borrow_mut() = Some(handle);
        }));

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn task_may_cancel_itself_while_running() {
        let scheduler = ManualScheduler::new();
        let slot: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let self_slot = slot.clone();
        let counter = count.clone();
        let handle = scheduler.schedule_repeating(
            ms(100),
            Box::new(move || {
                counter.set(counter.get() + 1);
                self_slot.borrow_mut().take();
            }),
        );
        *slot.borrow_mut() = Some(handle);

        scheduler.advance(ms(1_000));
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn handles_outliving_the_scheduler_cancel_quietly() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_once(ms(10), Box::new(|| {}));
        drop(scheduler);
        handle.cancel();
    }
}
