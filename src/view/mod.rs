use crate::animator::{JitterField, JitterOffset};
use crate::layout::{
    select_layout, Em, Placement, StarSize, BACKGROUND_LAYERS, GEOMETRY, KNOB_CRATERS,
    STAR_PARTS, STAR_SIZES,
};
use crate::state::ToggleState;
use crate::theme::ThemeMode;

pub mod markup;

pub use markup::render_html;

/// Class names shared by the markup and the stylesheet.
pub mod class {
    pub const ROOT: &str = "daynight-toggle";
    pub const WRAPPER: &str = "dnt-wrapper";
    pub const HOVERED: &str = "hovered";
    pub const ANIMATING: &str = "animating";
    pub const KNOB: &str = "dnt-knob";
    pub const SUN: &str = "sun";
    pub const MOON: &str = "moon";
    pub const CRATER: &str = "dnt-crater";
    pub const BG_LAYER: &str = "dnt-bg-layer";
    pub const CLOUDS: &str = "dnt-clouds";
    pub const CLOUDS_LIGHT: &str = "dnt-clouds-light";
    pub const CLOUD_ITEM: &str = "dnt-cloud-item";
    pub const STAR_FIELD: &str = "dnt-star-field";
    pub const STAR: &str = "dnt-star";
    pub const STAR_PART: &str = "dnt-star-part";
    pub const VISIBLE: &str = "visible";
}

/// Mount parameters that shape rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleProps {
    /// Visual size multiplier; the root font size is `scale / 3` px.
    /// Zero or negative values are passed through unchecked.
    pub scale: f64,
    pub class_name: Option<String>,
}

impl Default for ToggleProps {
    fn default() -> Self {
        Self {
            scale: 3.0,
            class_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootView {
    pub font_size_px: f64,
    pub class_names: Vec<String>,
}

impl RootView {
    pub fn font_size(&self) -> String {
        format!("{:.2}", self.font_size_px)
    }

    pub fn font_size_css(&self) -> String {
        format!("{}px", self.font_size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapperView {
    pub mode: ThemeMode,
    /// The hover layout is in effect.
    pub hovered: bool,
    pub animating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnobFace {
    Sun,
    Moon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobView {
    pub face: KnobFace,
    pub placement: Placement,
    pub diameter: Em,
}

impl KnobView {
    /// Craters only show on the moon.
    pub fn visible_craters(&self) -> usize {
        match self.face {
            KnobFace::Sun => 0,
            KnobFace::Moon => KNOB_CRATERS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerView {
    pub placement: Placement,
    pub diameter: Em,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudLayer {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudView {
    pub layer: CloudLayer,
    pub slot: usize,
    pub placement: Placement,
    pub drift: JitterOffset,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarView {
    pub size: StarSize,
    pub placement: Placement,
    pub parts: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarFieldView {
    pub visible: bool,
    pub stars: Vec<StarView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleView {
    pub root: RootView,
    pub wrapper: WrapperView,
    pub knob: KnobView,
    pub layers: [LayerView; BACKGROUND_LAYERS],
    pub clouds: Vec<CloudView>,
    pub star_field: StarFieldView,
}

impl ToggleView {
    pub fn mode(&self) -> ThemeMode {
        self.wrapper.mode
    }

    pub fn clouds_visible(&self) -> bool {
        self.clouds.iter().all(|cloud| cloud.visible)
    }

    pub fn stars_visible(&self) -> bool {
        self.star_field.visible
    }
}

pub fn render(state: ToggleState, props: &ToggleProps, jitter: &JitterField) -> ToggleView {
    let layout = select_layout(state);
    let mode = state.mode();

    let mut class_names = vec![class::ROOT.to_string()];
    if let Some(extra) = props
        .class_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    {
        class_names.push(extra.to_string());
    }

    let knob = KnobView {
        face: if state.is_dark {
            KnobFace::Moon
        } else {
            KnobFace::Sun
        },
        placement: layout.knob,
        diameter: GEOMETRY.knob_diameter,
    };

    let layers = std::array::from_fn(|index| LayerView {
        placement: layout.layers[index],
        diameter: GEOMETRY.layer_diameters[index],
    });

    let clouds_visible = !state.is_dark;
    let clouds = [CloudLayer::Primary, CloudLayer::Secondary]
        .into_iter()
        .flat_map(|layer| {
            layout
                .clouds
                .iter()
                .enumerate()
                .map(move |(slot, placement)| (layer, slot, *placement))
        })
        .enumerate()
        .map(|(item, (layer, slot, placement))| CloudView {
            layer,
            slot,
            placement,
            drift: jitter.offset(item),
            visible: clouds_visible,
        })
        .collect();

    let stars = STAR_SIZES
        .iter()
        .zip(layout.stars.iter())
        .map(|(size, placement)| StarView {
            size: *size,
            placement: *placement,
            parts: STAR_PARTS,
        })
        .collect();

    ToggleView {
        root: RootView {
            font_size_px: props.scale / 3.0,
            class_names,
        },
        wrapper: WrapperView {
            mode,
            hovered: state.hover_layout_active(),
            animating: state.is_animating,
        },
        knob,
        layers,
        clouds,
        star_field: StarFieldView {
            visible: state.is_dark,
            stars,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::{SequenceJitter, CLOUD_ITEMS};
    use crate::layout::{DARK_DEFAULT, LIGHT_DEFAULT, LIGHT_HOVER, STAR_SLOTS};

    fn light() -> ToggleState {
        ToggleState::new(ThemeMode::Light)
    }

    #[test]
    fn root_font_size_is_scale_over_three() {
        let view = render(light(), &ToggleProps::default(), &JitterField::new());
        assert_eq!(view.root.font_size(), "1.00");
        assert_eq!(view.root.font_size_css(), "1.00px");

        let props = ToggleProps {
            scale: 5.0,
            class_name: None,
        };
        let view = render(light(), &props, &JitterField::new());
        assert_eq!(view.root.font_size(), "1.67");
    }

    #[test]
    fn class_name_is_appended_to_root() {
        let props = ToggleProps {
            scale: 3.0,
            class_name: Some(" header-toggle ".into()),
        };
        let view = render(light(), &props, &JitterField::new());
        assert_eq!(view.root.class_names, vec!["daynight-toggle", "header-toggle"]);

        let blank = ToggleProps {
            scale: 3.0,
            class_name: Some("   ".into()),
        };
        let view = render(light(), &blank, &JitterField::new());
        assert_eq!(view.root.class_names, vec!["daynight-toggle"]);
    }

    #[test]
    fn tree_has_expected_element_counts() {
        let view = render(light(), &ToggleProps::default(), &JitterField::new());
        assert_eq!(view.layers.len(), 3);
        assert_eq!(view.clouds.len(), CLOUD_ITEMS);
        assert_eq!(
            view.clouds
                .iter()
                .filter(|cloud| cloud.layer == CloudLayer::Secondary)
                .count(),
            6
        );
        assert_eq!(view.star_field.stars.len(), STAR_SLOTS);
        assert!(view.star_field.stars.iter().all(|star| star.parts == 4));
    }

    #[test]
    fn light_mode_shows_sun_and_clouds() {
        let view = render(light(), &ToggleProps::default(), &JitterField::new());
        assert_eq!(view.knob.face, KnobFace::Sun);
        assert_eq!(view.knob.visible_craters(), 0);
        assert!(view.clouds_visible());
        assert!(!view.stars_visible());
        assert_eq!(view.knob.placement, LIGHT_DEFAULT.knob);
    }

    #[test]
    fn dark_mode_shows_moon_and_stars_but_keeps_clouds_in_tree() {
        let view = render(
            ToggleState::new(ThemeMode::Dark),
            &ToggleProps::default(),
            &JitterField::new(),
        );
        assert_eq!(view.knob.face, KnobFace::Moon);
        assert_eq!(view.knob.visible_craters(), 3);
        assert!(view.stars_visible());
        assert_eq!(view.clouds.len(), CLOUD_ITEMS);
        assert!(view.clouds.iter().all(|cloud| !cloud.visible));
        assert_eq!(view.knob.placement, DARK_DEFAULT.knob);
    }

    #[test]
    fn hover_uses_hover_table_in_light_mode_only() {
        let hovering = ToggleState {
            is_hovering: true,
            ..light()
        };
        let view = render(hovering, &ToggleProps::default(), &JitterField::new());
        assert!(view.wrapper.hovered);
        assert_eq!(view.clouds[0].placement, LIGHT_HOVER.clouds[0]);
        assert_eq!(view.clouds[6].placement, LIGHT_HOVER.clouds[0]);
        assert_eq!(view.knob.placement, LIGHT_HOVER.knob);

        let dark = ToggleState::new(ThemeMode::Dark);
        let dark_hovering = ToggleState {
            is_hovering: true,
            ..dark
        };
        assert_eq!(
            render(dark, &ToggleProps::default(), &JitterField::new()),
            render(dark_hovering, &ToggleProps::default(), &JitterField::new())
        );
    }

    #[test]
    fn drift_offsets_follow_item_order_across_both_layers() {
        let mut jitter = JitterField::new();
        let values: Vec<f64> = (0..CLOUD_ITEMS * 2)
            .map(|index| index as f64)
            .collect();
        jitter.tick(&mut SequenceJitter::new(values));

        let view = render(light(), &ToggleProps::default(), &jitter);
        assert_eq!(view.clouds[0].drift, JitterOffset::new(0.0, 1.0));
        assert_eq!(view.clouds[6].layer, CloudLayer::Secondary);
        assert_eq!(view.clouds[6].slot, 0);
        assert_eq!(view.clouds[6].drift, JitterOffset::new(12.0, 13.0));
    }
}
