use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::event::StateTransition;
use super::{ToggleEvent, TogglePhase, ToggleState};
use crate::theme::ThemeMode;

const TRANSITION_HISTORY_LIMIT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Apply(ToggleState),
    Ignore,
    Reject,
}

/// Idle/Animating controller behind the toggle.
///
/// The animating flag is the only guard: clicks landing inside the animation
/// window are dropped, not queued.
#[derive(Debug)]
pub struct ToggleMachine {
    state: ToggleState,
    transition_history: VecDeque<StateTransition>,
}

impl ToggleMachine {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            state: ToggleState::new(mode),
            transition_history: VecDeque::new(),
        }
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn phase(&self) -> TogglePhase {
        self.state.phase()
    }

    pub fn mode(&self) -> ThemeMode {
        self.state.mode()
    }

    pub fn can_transition(&self, event: ToggleEvent) -> bool {
        matches!(self.step(event), Step::Apply(_))
    }

    pub fn next_state(&self, event: ToggleEvent) -> Option<ToggleState> {
        match self.step(event) {
            Step::Apply(next) => Some(next),
            Step::Ignore | Step::Reject => None,
        }
    }

    fn step(&self, event: ToggleEvent) -> Step {
        use ToggleEvent::*;
        let current = self.state;
        match (current.phase(), event) {
            (TogglePhase::Idle, Click) => Step::Apply(flipped(current)),
            (TogglePhase::Animating, Click) => Step::Ignore,
            (TogglePhase::Animating, AnimationEnd) => Step::Apply(ToggleState {
                is_animating: false,
                ..current
            }),
            (TogglePhase::Idle, AnimationEnd) => Step::Reject,
            (TogglePhase::Idle, PointerEnter) if !current.is_hovering => {
                Step::Apply(ToggleState {
                    is_hovering: true,
                    ..current
                })
            }
            (_, PointerEnter) => Step::Ignore,
            (_, PointerLeave) if current.is_hovering => Step::Apply(ToggleState {
                is_hovering: false,
                ..current
            }),
            (_, PointerLeave) => Step::Ignore,
            (_, ExternalTheme(mode)) if mode != current.mode() => Step::Apply(ToggleState {
                is_dark: mode.is_dark(),
                ..current
            }),
            (_, ExternalTheme(_)) => Step::Ignore,
            (TogglePhase::Idle, SystemScheme(mode)) if mode != current.mode() => {
                Step::Apply(flipped(current))
            }
            (_, SystemScheme(_)) => Step::Ignore,
        }
    }

    /// Apply `event`. `Ok(None)` means the event was legal but changed nothing.
    pub fn transition(&mut self, event: ToggleEvent) -> StateResult<Option<ToggleState>> {
        match self.step(event) {
            Step::Apply(next) => {
                tracing::debug!(
                    from = ?self.state,
                    event = ?event,
                    to = ?next,
                    "toggle state transition"
                );
                let record = StateTransition::new(self.state, event, next);
                self.state = next;
                if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
                    self.transition_history.pop_front();
                }
                self.transition_history.push_back(record);
                Ok(Some(next))
            }
            Step::Ignore => {
                tracing::trace!(state = ?self.state, event = ?event, "toggle event ignored");
                Ok(None)
            }
            Step::Reject => {
                let from = self.phase();
                tracing::warn!(from = ?from, event = ?event, "invalid toggle transition requested");
                Err(StateError::InvalidStateTransition { from, event })
            }
        }
    }

    /// Flip the mode unless an animation is running. Returns the new mode.
    pub fn toggle(&mut self) -> Option<ThemeMode> {
        self.transition(ToggleEvent::Click)
            .ok()
            .flatten()
            .map(ToggleState::mode)
    }

    pub fn history(&self) -> impl Iterator<Item = &StateTransition> {
        self.transition_history.iter()
    }
}

fn flipped(state: ToggleState) -> ToggleState {
    ToggleState {
        is_dark: !state.is_dark,
        is_animating: true,
        is_hovering: false,
    }
}

impl Default for ToggleMachine {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

impl std::fmt::Display for ToggleMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ToggleMachine::{:?}({})", self.phase(), self.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_flips_mode_clears_hover_and_starts_animation() {
        let mut machine = ToggleMachine::new(ThemeMode::Light);
        machine
            .transition(ToggleEvent::PointerEnter)
            .expect("enter should work");
        assert!(machine.state().is_hovering);

        assert_eq!(machine.toggle(), Some(ThemeMode::Dark));
        let state = machine.state();
        assert!(state.is_dark);
        assert!(state.is_animating);
        assert!(!state.is_hovering);
    }

    #[test]
    fn clicks_during_animation_are_dropped() {
        let mut machine = ToggleMachine::new(ThemeMode::Light);
        assert_eq!(machine.toggle(), Some(ThemeMode::Dark));
        assert_eq!(machine.toggle(), None);
        assert_eq!(machine.toggle(), None);
        assert_eq!(machine.mode(), ThemeMode::Dark);

        machine
            .transition(ToggleEvent::AnimationEnd)
            .expect("animation end should work");
        assert_eq!(machine.toggle(), Some(ThemeMode::Light));
    }

    #[test]
    fn hover_enter_is_ignored_while_animating_but_leave_is_not() {
        let mut machine = ToggleMachine::new(ThemeMode::Light);
        machine.toggle();
        let entered = machine
            .transition(ToggleEvent::PointerEnter)
            .expect("enter is legal");
        assert_eq!(entered, None);
        assert!(!machine.state().is_hovering);

        let mut machine = ToggleMachine::new(ThemeMode::Light);
        machine
            .transition(ToggleEvent::PointerEnter)
            .expect("enter should work");
        assert!(!machine.can_transition(ToggleEvent::PointerEnter));
        assert!(machine.can_transition(ToggleEvent::PointerLeave));
        machine
            .transition(ToggleEvent::PointerLeave)
            .expect("leave should work");
        assert!(!machine.state().is_hovering);
    }

    #[test]
    fn external_theme_resyncs_only_on_difference() {
        let mut machine = ToggleMachine::new(ThemeMode::Light);
        let same = machine
            .transition(ToggleEvent::ExternalTheme(ThemeMode::Light))
            .expect("external sync is legal");
        assert_eq!(same, None);

        let next = machine
            .transition(ToggleEvent::ExternalTheme(ThemeMode::Dark))
            .expect("external sync is legal")
            .expect("differing theme should apply");
        assert!(next.is_dark);
        assert!(!next.is_animating);
    }

    #[test]
    fn system_scheme_toggles_when_idle_and_different() {
        let mut machine = ToggleMachine::new(ThemeMode::Light);
        assert!(!machine.can_transition(ToggleEvent::SystemScheme(ThemeMode::Light)));

        let next = machine
            .transition(ToggleEvent::SystemScheme(ThemeMode::Dark))
            .expect("system scheme is legal")
            .expect("differing scheme should apply");
        assert!(next.is_dark);
        assert!(next.is_animating);

        assert!(!machine.can_transition(ToggleEvent::SystemScheme(ThemeMode::Light)));
    }

    #[test]
    fn animation_end_while_idle_is_rejected_without_mutating_history() {
        let mut machine = ToggleMachine::new(ThemeMode::Dark);

        let err = machine
            .transition(ToggleEvent::AnimationEnd)
            .expect_err("idle -> animation end should fail");
        assert!(matches!(
            err,
            StateError::InvalidStateTransition {
                from: TogglePhase::Idle,
                event: ToggleEvent::AnimationEnd
            }
        ));
        assert_eq!(machine.state(), ToggleState::new(ThemeMode::Dark));
        assert_eq!(machine.history().count(), 0);
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut machine = ToggleMachine::new(ThemeMode::Light);
        machine
            .transition(ToggleEvent::PointerEnter)
            .expect("enter should work");
        machine.toggle();
        machine
            .transition(ToggleEvent::AnimationEnd)
            .expect("animation end should work");

        let events: Vec<_> = machine.history().map(|record| record.event).collect();
        assert_eq!(
            events,
            vec![
                ToggleEvent::PointerEnter,
                ToggleEvent::Click,
                ToggleEvent::AnimationEnd
            ]
        );
        let first = machine.history().next().expect("history should not be empty");
        assert_eq!(first.from, ToggleState::new(ThemeMode::Light));
    }

    #[test]
    fn history_is_bounded() {
        let mut machine = ToggleMachine::new(ThemeMode::Light);
        for _ in 0..(TRANSITION_HISTORY_LIMIT * 2) {
            machine
                .transition(ToggleEvent::PointerEnter)
                .expect("enter should work");
            machine
                .transition(ToggleEvent::PointerLeave)
                .expect("leave should work");
        }
        assert_eq!(machine.history().count(), TRANSITION_HISTORY_LIMIT);
    }

    #[test]
    fn display_reports_phase_and_mode() {
        let machine = ToggleMachine::new(ThemeMode::Dark);
        assert_eq!(machine.to_string(), "ToggleMachine::Idle(dark)");
    }
}
