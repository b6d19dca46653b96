use std::fmt;
use std::ops::{Add, Neg};

use crate::state::ToggleState;
use crate::theme::ThemeMode;

pub const BACKGROUND_LAYERS: usize = 3;
pub const CLOUD_SLOTS: usize = 6;
pub const STAR_SLOTS: usize = 6;
pub const STAR_PARTS: usize = 4;
pub const KNOB_CRATERS: usize = 3;

/// Length relative to the root font size.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Em(pub f64);

impl Em {
    pub const ZERO: Em = Em(0.0);

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Add for Em {
    type Output = Em;

    fn add(self, rhs: Em) -> Em {
        Em(self.0 + rhs.0)
    }
}

impl Neg for Em {
    type Output = Em;

    fn neg(self) -> Em {
        Em(-self.0)
    }
}

impl fmt::Display for Em {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            return f.write_str("0em");
        }
        write!(f, "{}em", self.0)
    }
}

/// Which pair of container edges a placement is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub anchor: Anchor,
    /// Offset from the left (or right) edge.
    pub horizontal: Em,
    /// Offset from the top (or bottom) edge.
    pub vertical: Em,
}

impl Placement {
    pub const fn top_left(left: f64, top: f64) -> Self {
        Self {
            anchor: Anchor::TopLeft,
            horizontal: Em(left),
            vertical: Em(top),
        }
    }

    pub const fn bottom_right(right: f64, bottom: f64) -> Self {
        Self {
            anchor: Anchor::BottomRight,
            horizontal: Em(right),
            vertical: Em(bottom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarSize {
    Large,
    Mid,
    Tiny,
}

impl StarSize {
    pub const fn class_name(self) -> &'static str {
        match self {
            StarSize::Large => "large",
            StarSize::Mid => "mid",
            StarSize::Tiny => "tiny",
        }
    }

    pub const fn diameter(self) -> Em {
        match self {
            StarSize::Large => Em(12.0),
            StarSize::Mid => Em(8.0),
            StarSize::Tiny => Em(4.0),
        }
    }
}

pub const STAR_SIZES: [StarSize; STAR_SLOTS] = [
    StarSize::Large,
    StarSize::Large,
    StarSize::Mid,
    StarSize::Mid,
    StarSize::Tiny,
    StarSize::Tiny,
];

/// Fixed outer dimensions of the drawn elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub wrapper_width: Em,
    pub wrapper_height: Em,
    pub knob_diameter: Em,
    pub crater_diameters: [Em; KNOB_CRATERS],
    /// Relative to the knob's top-left corner.
    pub crater_origins: [Placement; KNOB_CRATERS],
    pub layer_diameters: [Em; BACKGROUND_LAYERS],
    pub cloud_diameter: Em,
}

pub const GEOMETRY: Geometry = Geometry {
    wrapper_width: Em(180.0),
    wrapper_height: Em(70.0),
    knob_diameter: Em(55.0),
    crater_diameters: [Em(22.0), Em(11.0), Em(8.0)],
    crater_origins: [
        Placement::top_left(8.0, 18.0),
        Placement::top_left(30.0, 8.0),
        Placement::top_left(32.0, 36.0),
    ],
    layer_diameters: [Em(110.0), Em(150.0), Em(190.0)],
    cloud_diameter: Em(50.0),
};

/// Every positioned decoration for one mode and one layout kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationLayout {
    pub knob: Placement,
    pub layers: [Placement; BACKGROUND_LAYERS],
    pub clouds: [Placement; CLOUD_SLOTS],
    pub stars: [Placement; STAR_SLOTS],
}

const CLOUDS_DEFAULT: [Placement; CLOUD_SLOTS] = [
    Placement::bottom_right(-20.0, 10.0),
    Placement::bottom_right(-10.0, -25.0),
    Placement::bottom_right(20.0, -40.0),
    Placement::bottom_right(50.0, -35.0),
    Placement::bottom_right(75.0, -60.0),
    Placement::bottom_right(110.0, -50.0),
];

const CLOUDS_HOVER: [Placement; CLOUD_SLOTS] = [
    Placement::bottom_right(-24.0, 10.0),
    Placement::bottom_right(-12.0, -27.0),
    Placement::bottom_right(17.0, -43.0),
    Placement::bottom_right(46.0, -39.0),
    Placement::bottom_right(70.0, -65.0),
    Placement::bottom_right(109.0, -54.0),
];

const STARS: [Placement; STAR_SLOTS] = [
    Placement::top_left(24.0, 12.0),
    Placement::top_left(58.0, 42.0),
    Placement::top_left(42.0, 24.0),
    Placement::top_left(80.0, 14.0),
    Placement::top_left(14.0, 44.0),
    Placement::top_left(70.0, 32.0),
];

// Halos are centred on the knob; each layer is offset by half its extra diameter.
pub const LIGHT_DEFAULT: DecorationLayout = DecorationLayout {
    knob: Placement::top_left(7.5, 7.5),
    layers: [
        Placement::top_left(-20.0, -20.0),
        Placement::top_left(-40.0, -40.0),
        Placement::top_left(-60.0, -60.0),
    ],
    clouds: CLOUDS_DEFAULT,
    stars: STARS,
};

pub const LIGHT_HOVER: DecorationLayout = DecorationLayout {
    knob: Placement::top_left(12.0, 7.5),
    layers: [
        Placement::top_left(-14.0, -20.0),
        Placement::top_left(-36.0, -40.0),
        Placement::top_left(-58.0, -60.0),
    ],
    clouds: CLOUDS_HOVER,
    stars: STARS,
};

pub const DARK_DEFAULT: DecorationLayout = DecorationLayout {
    knob: Placement::top_left(117.5, 7.5),
    layers: [
        Placement::top_left(90.0, -20.0),
        Placement::top_left(70.0, -40.0),
        Placement::top_left(50.0, -60.0),
    ],
    clouds: CLOUDS_DEFAULT,
    stars: STARS,
};

/// The night sky does not react to hover.
pub const DARK_HOVER: DecorationLayout = DARK_DEFAULT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Default,
    Hover,
}

pub fn layout_kind(state: ToggleState) -> LayoutKind {
    if state.hover_layout_active() {
        LayoutKind::Hover
    } else {
        LayoutKind::Default
    }
}

pub fn layout_for(mode: ThemeMode, kind: LayoutKind) -> &'static DecorationLayout {
    match (mode, kind) {
        (ThemeMode::Light, LayoutKind::Default) => &LIGHT_DEFAULT,
        (ThemeMode::Light, LayoutKind::Hover) => &LIGHT_HOVER,
        (ThemeMode::Dark, LayoutKind::Default) => &DARK_DEFAULT,
        (ThemeMode::Dark, LayoutKind::Hover) => &DARK_HOVER,
    }
}

pub fn select_layout(state: ToggleState) -> &'static DecorationLayout {
    layout_for(state.mode(), layout_kind(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_tables_hold_six_slots_anchored_bottom_right() {
        for layout in [&LIGHT_DEFAULT, &LIGHT_HOVER, &DARK_DEFAULT] {
            assert_eq!(layout.clouds.len(), CLOUD_SLOTS);
            assert!(layout
                .clouds
                .iter()
                .all(|cloud| cloud.anchor == Anchor::BottomRight));
        }
        assert_eq!(LIGHT_DEFAULT.clouds[0], Placement::bottom_right(-20.0, 10.0));
        assert_eq!(LIGHT_HOVER.clouds[5], Placement::bottom_right(109.0, -54.0));
    }

    #[test]
    fn hover_layout_only_selected_for_idle_light_hover() {
        let hovering = ToggleState {
            is_dark: false,
            is_animating: false,
            is_hovering: true,
        };
        assert_eq!(select_layout(hovering), &LIGHT_HOVER);
        assert_eq!(
            select_layout(ToggleState {
                is_animating: true,
                ..hovering
            }),
            &LIGHT_DEFAULT
        );
        assert_eq!(
            select_layout(ToggleState {
                is_dark: true,
                ..hovering
            }),
            &DARK_DEFAULT
        );
    }

    #[test]
    fn dark_hover_matches_dark_default() {
        assert_eq!(
            layout_for(ThemeMode::Dark, LayoutKind::Hover),
            layout_for(ThemeMode::Dark, LayoutKind::Default)
        );
    }

    #[test]
    fn knob_rests_inside_the_wrapper_in_both_modes() {
        for layout in [&LIGHT_DEFAULT, &DARK_DEFAULT] {
            let right_edge = layout.knob.horizontal.value() + GEOMETRY.knob_diameter.value();
            assert!(layout.knob.horizontal.value() >= 0.0);
            assert!(right_edge <= GEOMETRY.wrapper_width.value());
        }
    }

    #[test]
    fn em_formats_as_css_length() {
        assert_eq!(Em(-20.0).to_string(), "-20em");
        assert_eq!(Em(7.5).to_string(), "7.5em");
        assert_eq!(Em::ZERO.to_string(), "0em");
        assert_eq!((-Em(2.0) + Em(0.5)).to_string(), "-1.5em");
    }

    #[test]
    fn star_sizes_pair_up_large_mid_tiny() {
        assert_eq!(
            STAR_SIZES.map(StarSize::class_name),
            ["large", "large", "mid", "mid", "tiny", "tiny"]
        );
    }
}
