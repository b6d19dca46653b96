use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gtk4::glib::{self, ControlFlow, SourceId};
use gtk4::prelude::*;
use gtk4::TickCallbackId;

use crate::scheduler::{OnceTask, RepeatingTask, Scheduler, TaskHandle, TaskId};

enum LiveSource {
    Timer(SourceId),
    Tick(TickCallbackId),
}

impl LiveSource {
    fn remove(self) {
        match self {
            LiveSource::Timer(source) => source.remove(),
            LiveSource::Tick(tick) => tick.remove(),
        }
    }
}

type SourceMap = Rc<RefCell<HashMap<TaskId, LiveSource>>>;

/// [`Scheduler`] backed by the GLib main loop and a widget's frame clock.
///
/// One-shot sources and tick callbacks unregister themselves before running,
/// so only sources GLib still owns are ever removed on cancel.
pub struct GlibScheduler {
    widget: glib::WeakRef<gtk4::Widget>,
    sources: SourceMap,
    next_id: Cell<u64>,
}

impl GlibScheduler {
    pub fn new(widget: &impl IsA<gtk4::Widget>) -> Self {
        Self {
            widget: widget.upcast_ref::<gtk4::Widget>().downgrade(),
            sources: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(0),
        }
    }

    pub fn live_sources(&self) -> usize {
        self.sources.borrow().len()
    }

    fn allocate_id(&self) -> TaskId {
        let next = self.next_id.get().wrapping_add(1);
        self.next_id.set(next);
        TaskId::new(next)
    }

    fn register(&self, id: TaskId, source: LiveSource) -> TaskHandle {
        self.sources.borrow_mut().insert(id, source);
        let sources = Rc::downgrade(&self.sources);
        TaskHandle::new(id, move |id| {
            let Some(sources) = sources.upgrade() else {
                return;
            };
            let removed = sources.borrow_mut().remove(&id);
            if let Some(source) = removed {
                source.remove();
            }
        })
    }
}

fn forget(sources: &Weak<RefCell<HashMap<TaskId, LiveSource>>>, id: TaskId) {
    if let Some(sources) = sources.upgrade() {
        let finished = sources.borrow_mut().remove(&id);
        // GLib drops the source itself once the callback returns.
        drop(finished);
    }
}

impl Scheduler for GlibScheduler {
    fn schedule_once(&self, delay: Duration, task: OnceTask) -> TaskHandle {
        let id = self.allocate_id();
        let sources = Rc::downgrade(&self.sources);
        let source = glib::timeout_add_local_once(delay, move || {
            forget(&sources, id);
            task();
        });
        self.register(id, LiveSource::Timer(source))
    }

    fn schedule_repeating(&self, interval: Duration, mut task: RepeatingTask) -> TaskHandle {
        let id = self.allocate_id();
        let source = glib::timeout_add_local(interval, move || {
            task();
            ControlFlow::Continue
        });
        self.register(id, LiveSource::Timer(source))
    }

    fn request_frame(&self, task: OnceTask) -> TaskHandle {
        let id = self.allocate_id();
        let Some(widget) = self.widget.upgrade() else {
            tracing::trace!(task = id.raw(), "frame requested after widget was destroyed");
            return TaskHandle::new(id, |_| {});
        };
        let sources = Rc::downgrade(&self.sources);
        let task = RefCell::new(Some(task));
        let tick = widget.add_tick_callback(move |_, _| {
            forget(&sources, id);
            let task = task.borrow_mut().take();
            if let Some(task) = task {
                task();
            }
            ControlFlow::Break
        });
        self.register(id, LiveSource::Tick(tick))
    }
}

impl Drop for GlibScheduler {
    fn drop(&mut self) {
        let sources: Vec<LiveSource> = self.sources.borrow_mut().drain().map(|(_, s)| s).collect();
        if !sources.is_empty() {
            tracing::debug!(count = sources.len(), "removing leftover glib sources");
        }
        for source in sources {
            source.remove();
        }
    }
}
