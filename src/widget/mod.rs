//! The mounted toggle.
//!
//! [`DayNightToggle`] owns the state machine, the drift field and every task
//! it has scheduled. Scheduled tasks only hold weak references back to the
//! toggle, and unmounting (or dropping) it cancels them all.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::animator::{JitterField, JitterSource, RandomJitter, JITTER_INTERVAL};
use crate::config::ToggleConfig;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::state::{ToggleEvent, ToggleMachine, ToggleState};
use crate::theme::ThemeMode;
use crate::view::{self, ToggleProps, ToggleView};

/// Length of the toggle animation; clicks inside it are dropped.
pub const TOGGLE_ANIMATION: Duration = Duration::from_millis(700);

pub type ChangeCallback = Box<dyn FnMut(ThemeMode)>;
pub type RedrawCallback = Box<dyn FnMut()>;

#[derive(Default)]
struct ToggleTasks {
    drift: Option<TaskHandle>,
    animation_end: Option<TaskHandle>,
    relayout: Option<TaskHandle>,
}

struct ToggleCore {
    machine: ToggleMachine,
    props: ToggleProps,
    follow_system: bool,
    // What the view currently shows; hover changes reach it one frame later.
    presented: ToggleState,
    jitter: JitterField,
    jitter_source: Box<dyn JitterSource>,
    on_change: Option<ChangeCallback>,
    on_redraw: Option<RedrawCallback>,
    pending_system: Option<ThemeMode>,
    scheduler: Rc<dyn Scheduler>,
    tasks: ToggleTasks,
    mounted: bool,
}

type SharedCore = Rc<RefCell<ToggleCore>>;

pub struct ToggleBuilder {
    config: ToggleConfig,
    on_change: Option<ChangeCallback>,
    jitter_source: Option<Box<dyn JitterSource>>,
}

impl ToggleBuilder {
    pub fn on_change(mut self, callback: impl FnMut(ThemeMode) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn jitter_source(mut self, source: impl JitterSource + 'static) -> Self {
        self.jitter_source = Some(Box::new(source));
        self
    }

    /// Create the toggle and start the ambient drift interval.
    pub fn mount(self, scheduler: impl Scheduler + 'static) -> DayNightToggle {
        let scheduler: Rc<dyn Scheduler> = Rc::new(scheduler);
        let ToggleBuilder {
            config,
            on_change,
            jitter_source,
        } = self;
        let machine = ToggleMachine::new(config.theme);
        let presented = machine.state();
        let core = Rc::new(RefCell::new(ToggleCore {
            machine,
            props: ToggleProps {
                scale: config.scale,
                class_name: config.class_name,
            },
            follow_system: config.follow_system,
            presented,
            jitter: JitterField::new(),
            jitter_source: jitter_source
                .unwrap_or_else(|| Box::new(RandomJitter::from_entropy())),
            on_change,
            on_redraw: None,
            pending_system: None,
            scheduler: scheduler.clone(),
            tasks: ToggleTasks::default(),
            mounted: true,
        }));

        let weak = Rc::downgrade(&core);
        let drift = scheduler.schedule_repeating(
            JITTER_INTERVAL,
            Box::new(move || with_core(&weak, drift_tick)),
        );
        core.borrow_mut().tasks.drift = Some(drift);

        tracing::debug!(
            mode = %config.theme,
            scale = config.scale,
            follow_system = config.follow_system,
            "mounted day/night toggle"
        );
        DayNightToggle { core }
    }
}

/// Animated day/night switch.
pub struct DayNightToggle {
    core: SharedCore,
}

impl DayNightToggle {
    pub fn builder(config: ToggleConfig) -> ToggleBuilder {
        ToggleBuilder {
            config,
            on_change: None,
            jitter_source: None,
        }
    }

    /// Flip the mode and notify the host before returning. Ignored while the
    /// previous toggle is still animating; returns the new mode when accepted.
    pub fn toggle(&self) -> Option<ThemeMode> {
        toggle_with(&self.core, ToggleEvent::Click)
    }

    pub fn set_hover(&self, hovering: bool) {
        let event = if hovering {
            ToggleEvent::PointerEnter
        } else {
            ToggleEvent::PointerLeave
        };
        let changed = {
            let mut core = self.core.borrow_mut();
            if !core.mounted {
                return;
            }
            matches!(core.machine.transition(event), Ok(Some(_)))
        };
        if changed {
            schedule_relayout(&self.core);
        }
    }

    pub fn pointer_enter(&self) {
        self.set_hover(true);
    }

    pub fn pointer_leave(&self) {
        self.set_hover(false);
    }

    /// Pointer motion inside the toggle; coalesced to one relayout per frame.
    pub fn pointer_moved(&self) {
        let hovering = {
            let core = self.core.borrow();
            core.mounted && core.machine.state().is_hovering && !core.machine.state().is_animating
        };
        if hovering {
            schedule_relayout(&self.core);
        }
    }

    /// The host re-supplied `theme`. Resynchronises without calling `on_change`.
    pub fn sync_external_theme(&self, mode: ThemeMode) {
        let changed = {
            let mut core = self.core.borrow_mut();
            if !core.mounted {
                return;
            }
            match core.machine.transition(ToggleEvent::ExternalTheme(mode)) {
                Ok(Some(next)) => {
                    core.tasks.relayout = None;
                    core.presented = next;
                    true
                }
                _ => false,
            }
        };
        if changed {
            tracing::debug!(%mode, "synchronised external theme");
            request_redraw(&self.core);
        }
    }

    /// The OS colour scheme changed. Only acts when following the system; a
    /// change landing inside the animation window is applied when it ends.
    pub fn system_scheme_changed(&self, scheme: ThemeMode) -> Option<ThemeMode> {
        {
            let mut core = self.core.borrow_mut();
            if !core.mounted || !core.follow_system {
                tracing::trace!(%scheme, "system scheme change ignored");
                return None;
            }
            if core.machine.state().is_animating {
                tracing::debug!(%scheme, "system scheme change deferred until animation ends");
                core.pending_system = Some(scheme);
                return None;
            }
            core.pending_system = None;
        }
        toggle_with(&self.core, ToggleEvent::SystemScheme(scheme))
    }

    /// Called whenever the rendered view may have changed.
    pub fn connect_redraw(&self, callback: impl FnMut() + 'static) {
        self.core.borrow_mut().on_redraw = Some(Box::new(callback));
    }

    pub fn state(&self) -> ToggleState {
        self.core.borrow().machine.state()
    }

    pub fn mode(&self) -> ThemeMode {
        self.core.borrow().machine.mode()
    }

    pub fn is_mounted(&self) -> bool {
        self.core.borrow().mounted
    }

    pub fn jitter(&self) -> JitterField {
        self.core.borrow().jitter.clone()
    }

    pub fn view(&self) -> ToggleView {
        let core = self.core.borrow();
        view::render(core.presented, &core.props, &core.jitter)
    }

    /// Cancel every pending timer and frame callback. Idempotent.
    pub fn unmount(&self) {
        let tasks = {
            let Ok(mut core) = self.core.try_borrow_mut() else {
                tracing::warn!("toggle busy during unmount; pending tasks stay weakly bound");
                return;
            };
            if !core.mounted {
                return;
            }
            core.mounted = false;
            core.pending_system = None;
            std::mem::take(&mut core.tasks)
        };
        // Handles cancel on drop, outside the borrow.
        drop(tasks);
        tracing::debug!("unmounted day/night toggle");
    }
}

impl Drop for DayNightToggle {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for DayNightToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.core.try_borrow() {
            Ok(core) => f
                .debug_struct("DayNightToggle")
                .field("state", &core.machine.state())
                .field("mounted", &core.mounted)
                .finish(),
            Err(_) => f.write_str("DayNightToggle { <busy> }"),
        }
    }
}

fn with_core(weak: &Weak<RefCell<ToggleCore>>, f: impl FnOnce(&SharedCore)) {
    if let Some(core) = weak.upgrade() {
        f(&core);
    }
}

fn toggle_with(shared: &SharedCore, event: ToggleEvent) -> Option<ThemeMode> {
    let (mode, callback) = {
        let mut core = shared.borrow_mut();
        if !core.mounted {
            return None;
        }
        let next = match core.machine.transition(event) {
            Ok(Some(next)) => next,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(?err, "toggle rejected");
                return None;
            }
        };
        core.tasks.relayout = None;
        core.presented = next;
        let weak = Rc::downgrade(shared);
        let handle = core.scheduler.schedule_once(
            TOGGLE_ANIMATION,
            Box::new(move || with_core(&weak, finish_animation)),
        );
        core.tasks.animation_end = Some(handle);
        (next.mode(), core.on_change.take())
    };

    if let Some(mut callback) = callback {
        tracing::debug!(%mode, "notify theme change");
        callback(mode);
        let mut core = shared.borrow_mut();
        if core.on_change.is_none() {
            core.on_change = Some(callback);
        }
    }
    request_redraw(shared);
    Some(mode)
}

fn finish_animation(shared: &SharedCore) {
    let pending = {
        let mut core = shared.borrow_mut();
        core.tasks.animation_end = None;
        if core.machine.transition(ToggleEvent::AnimationEnd).is_err() {
            return;
        }
        // Whatever landed mid-transition, settle on the default layout.
        core.tasks.relayout = None;
        core.presented = core.machine.state();
        let mode = core.machine.mode();
        let follow_system = core.follow_system;
        core.pending_system
            .take()
            .filter(|scheme| follow_system && *scheme != mode)
    };
    request_redraw(shared);

    if let Some(scheme) = pending {
        tracing::debug!(%scheme, "apply deferred system scheme change");
        toggle_with(shared, ToggleEvent::SystemScheme(scheme));
    }
}

fn schedule_relayout(shared: &SharedCore) {
    let mut core = shared.borrow_mut();
    if core.tasks.relayout.is_some() {
        return;
    }
    let weak = Rc::downgrade(shared);
    let handle = core
        .scheduler
        .request_frame(Box::new(move || with_core(&weak, apply_relayout)));
    core.tasks.relayout = Some(handle);
}

fn apply_relayout(shared: &SharedCore) {
    let changed = {
        let mut core = shared.borrow_mut();
        core.tasks.relayout = None;
        let state = core.machine.state();
        if state.is_animating || core.presented == state {
            false
        } else {
            core.presented = state;
            true
        }
    };
    if changed {
        request_redraw(shared);
    }
}

fn drift_tick(shared: &SharedCore) {
    {
        let mut core = shared.borrow_mut();
        let ToggleCore {
            jitter,
            jitter_source,
            ..
        } = &mut *core;
        jitter.tick(jitter_source.as_mut());
    }
    request_redraw(shared);
}

fn request_redraw(shared: &SharedCore) {
    let callback = shared.borrow_mut().on_redraw.take();
    if let Some(mut callback) = callback {
        callback();
        let mut core = shared.borrow_mut();
        if core.on_redraw.is_none() {
            core.on_redraw = Some(callback);
        }
    }
}
