use super::model::ToggleState;
use crate::theme::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    /// User click on the wrapper.
    Click,
    /// The animation window elapsed.
    AnimationEnd,
    PointerEnter,
    PointerLeave,
    /// The host re-supplied the `theme` parameter.
    ExternalTheme(ThemeMode),
    /// The OS colour scheme changed while following the system.
    SystemScheme(ThemeMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: ToggleState,
    pub event: ToggleEvent,
    pub to: ToggleState,
}

impl StateTransition {
    pub const fn new(from: ToggleState, event: ToggleEvent, to: ToggleState) -> Self {
        Self { from, event, to }
    }
}
