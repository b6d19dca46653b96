use crate::theme::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TogglePhase {
    #[default]
    Idle,
    Animating,
}

/// Flags driving everything the toggle draws.
///
/// `is_hovering` only matters while `is_animating` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleState {
    pub is_dark: bool,
    pub is_animating: bool,
    pub is_hovering: bool,
}

impl ToggleState {
    pub const fn new(mode: ThemeMode) -> Self {
        Self {
            is_dark: mode.is_dark(),
            is_animating: false,
            is_hovering: false,
        }
    }

    pub const fn mode(self) -> ThemeMode {
        ThemeMode::from_dark(self.is_dark)
    }

    pub const fn phase(self) -> TogglePhase {
        if self.is_animating {
            TogglePhase::Animating
        } else {
            TogglePhase::Idle
        }
    }

    /// Hover repositioning only applies to an idle toggle showing the light sky.
    pub const fn hover_layout_active(self) -> bool {
        self.is_hovering && !self.is_animating && !self.is_dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_mirrors_initial_mode() {
        let light = ToggleState::new(ThemeMode::Light);
        assert!(!light.is_dark);
        assert_eq!(light.phase(), TogglePhase::Idle);

        let dark = ToggleState::new(ThemeMode::Dark);
        assert!(dark.is_dark);
        assert_eq!(dark.mode(), ThemeMode::Dark);
    }

    #[test]
    fn hover_layout_requires_idle_light_hover() {
        let hovering = ToggleState {
            is_dark: false,
            is_animating: false,
            is_hovering: true,
        };
        assert!(hovering.hover_layout_active());
        assert!(!ToggleState {
            is_animating: true,
            ..hovering
        }
        .hover_layout_active());
        assert!(!ToggleState {
            is_dark: true,
            ..hovering
        }
        .hover_layout_active());
    }
}
