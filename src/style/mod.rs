use crate::animator::{JitterOffset, JITTER_INTERVAL};
use crate::layout::{Anchor, Placement, StarSize, GEOMETRY};
use crate::theme::{default_color_tokens, ColorTokens, ThemeMode};
use crate::view::class;
use crate::widget::TOGGLE_ANIMATION;

/// Compile-time motion tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionTokens {
    pub toggle_ms: u32,
    pub hover_ms: u32,
    pub drift_ms: u32,
    pub fade_ms: u32,
}

pub const MOTION_TOKENS: MotionTokens = MotionTokens {
    toggle_ms: TOGGLE_ANIMATION.as_millis() as u32,
    hover_ms: 300,
    drift_ms: JITTER_INTERVAL.as_millis() as u32,
    fade_ms: 400,
};

/// `right: -20em; bottom: 10em` style offsets for a placement.
pub fn placement_declarations(placement: &Placement) -> String {
    let (horizontal, vertical) = match placement.anchor {
        Anchor::TopLeft => ("left", "top"),
        Anchor::BottomRight => ("right", "bottom"),
    };
    format!(
        "{horizontal}: {}; {vertical}: {}",
        placement.horizontal, placement.vertical
    )
}

/// Drift is layered on top of the placement; no drift means no transform.
pub fn drift_declaration(offset: &JitterOffset) -> Option<String> {
    if *offset == JitterOffset::ZERO {
        return None;
    }
    Some(format!("transform: translate({}, {})", offset.dx, offset.dy))
}

pub fn default_stylesheet() -> String {
    stylesheet(
        MOTION_TOKENS,
        &default_color_tokens(ThemeMode::Light),
        &default_color_tokens(ThemeMode::Dark),
    )
}

/// The stylesheet that ships next to the markup.
pub fn stylesheet(motion: MotionTokens, light: &ColorTokens, dark: &ColorTokens) -> String {
    let MotionTokens {
        toggle_ms,
        hover_ms,
        drift_ms,
        fade_ms,
    } = motion;
    let wrapper_width = GEOMETRY.wrapper_width;
    let wrapper_height = GEOMETRY.wrapper_height;
    let knob_size = GEOMETRY.knob_diameter;
    let cloud = GEOMETRY.cloud_diameter;
    let [layer_1, layer_2, layer_3] = GEOMETRY.layer_diameters;
    let [crater_1, crater_2, crater_3] = GEOMETRY.crater_diameters;
    let [crater_at_1, crater_at_2, crater_at_3] = GEOMETRY
        .crater_origins
        .map(|origin| placement_declarations(&origin));
    let star_large = StarSize::Large.diameter();
    let star_mid = StarSize::Mid.diameter();
    let star_tiny = StarSize::Tiny.diameter();
    format!(
        "
.{root} {{
  display: inline-block;
  line-height: 0;
}}
.{wrapper} {{
  position: relative;
  overflow: hidden;
  width: {wrapper_width};
  height: {wrapper_height};
  border-radius: {wrapper_height};
  cursor: pointer;
  background: {light_sky};
  box-shadow: inset 0 0.5em 1em {light_sky_shadow};
  transition: background {toggle_ms}ms cubic-bezier(0.4, 0, 0.2, 1);
}}
.{wrapper}.dark {{
  background: {dark_sky};
  box-shadow: inset 0 0.5em 1em {dark_sky_shadow};
}}
.{knob} {{
  position: absolute;
  z-index: 3;
  width: {knob_size};
  height: {knob_size};
  border-radius: 50%;
  overflow: hidden;
  transition: left {toggle_ms}ms cubic-bezier(0.56, 1.35, 0.52, 1),
              background {toggle_ms}ms ease,
              box-shadow {hover_ms}ms ease;
}}
.{knob}.{sun} {{
  background: {light_knob};
  box-shadow: 0 0 1.5em {light_knob_shadow};
}}
.{knob}.{moon} {{
  background: {dark_knob};
  box-shadow: 0 0 1.5em {dark_knob_shadow};
}}
.{crater} {{
  position: absolute;
  border-radius: 50%;
  background: {crater_fill};
  opacity: 0;
  transition: opacity {toggle_ms}ms ease;
}}
.{knob}.{moon} .{crater} {{
  opacity: 1;
}}
.{crater}:nth-child(1) {{ width: {crater_1}; height: {crater_1}; {crater_at_1}; }}
.{crater}:nth-child(2) {{ width: {crater_2}; height: {crater_2}; {crater_at_2}; }}
.{crater}:nth-child(3) {{ width: {crater_3}; height: {crater_3}; {crater_at_3}; }}
.{bg_layer} {{
  position: absolute;
  z-index: 1;
  border-radius: 50%;
  background: {light_layer};
  transition: left {toggle_ms}ms cubic-bezier(0.56, 1.35, 0.52, 1),
              background {toggle_ms}ms ease;
}}
.{wrapper}.{hovered} .{bg_layer} {{
  transition-duration: {hover_ms}ms;
}}
.{wrapper}.dark .{bg_layer} {{
  background: {dark_layer};
}}
.{bg_layer}:nth-of-type(2) {{ width: {layer_1}; height: {layer_1}; }}
.{bg_layer}:nth-of-type(3) {{ width: {layer_2}; height: {layer_2}; }}
.{bg_layer}:nth-of-type(4) {{ width: {layer_3}; height: {layer_3}; }}
.{clouds},
.{clouds_light} {{
  position: absolute;
  inset: 0;
  z-index: 2;
  transition: opacity {fade_ms}ms ease;
}}
.{clouds_light} {{
  z-index: 1;
  transform: translate(-4em, -6em);
}}
.{cloud_item} {{
  position: absolute;
  width: {cloud};
  height: {cloud};
  border-radius: 50%;
  background: {cloud_primary};
  transition: right {hover_ms}ms ease,
              bottom {hover_ms}ms ease,
              transform {drift_ms}ms ease-in-out;
}}
.{clouds_light} .{cloud_item} {{
  background: {cloud_secondary};
}}
.{wrapper}.dark .{clouds},
.{wrapper}.dark .{clouds_light} {{
  opacity: 0;
  visibility: hidden;
}}
.{star_field} {{
  position: absolute;
  inset: 0;
  z-index: 2;
  opacity: 0;
  visibility: hidden;
  transform: translateY(-20em);
  transition: opacity {fade_ms}ms ease,
              transform {toggle_ms}ms ease;
}}
.{star_field}.{visible} {{
  opacity: 1;
  visibility: visible;
  transform: translateY(0);
}}
.{star} {{
  position: absolute;
}}
.{star}.large {{ width: {star_large}; height: {star_large}; }}
.{star}.mid {{ width: {star_mid}; height: {star_mid}; }}
.{star}.tiny {{ width: {star_tiny}; height: {star_tiny}; }}
.{star_part} {{
  position: absolute;
  width: 50%;
  height: 50%;
  background: {star_fill};
}}
.{star_part}:nth-child(1) {{ left: 0; top: 0; border-bottom-right-radius: 100%; }}
.{star_part}:nth-child(2) {{ right: 0; top: 0; border-bottom-left-radius: 100%; }}
.{star_part}:nth-child(3) {{ left: 0; bottom: 0; border-top-right-radius: 100%; }}
.{star_part}:nth-child(4) {{ right: 0; bottom: 0; border-top-left-radius: 100%; }}
",
        root = class::ROOT,
        wrapper = class::WRAPPER,
        hovered = class::HOVERED,
        knob = class::KNOB,
        sun = class::SUN,
        moon = class::MOON,
        crater = class::CRATER,
        bg_layer = class::BG_LAYER,
        clouds = class::CLOUDS,
        clouds_light = class::CLOUDS_LIGHT,
        cloud_item = class::CLOUD_ITEM,
        star_field = class::STAR_FIELD,
        star = class::STAR,
        star_part = class::STAR_PART,
        visible = class::VISIBLE,
        light_sky = light.sky_background,
        light_sky_shadow = light.sky_shadow,
        dark_sky = dark.sky_background,
        dark_sky_shadow = dark.sky_shadow,
        light_knob = light.knob_fill,
        light_knob_shadow = light.knob_shadow,
        dark_knob = dark.knob_fill,
        dark_knob_shadow = dark.knob_shadow,
        crater_fill = dark.crater_fill,
        light_layer = light.layer_fill,
        dark_layer = dark.layer_fill,
        cloud_primary = light.cloud_primary,
        cloud_secondary = light.cloud_secondary,
        star_fill = dark.star_fill,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_tokens_track_animation_constants() {
        assert_eq!(MOTION_TOKENS.toggle_ms, 700);
        assert_eq!(MOTION_TOKENS.drift_ms, 1_000);
    }

    #[test]
    fn placement_declarations_use_anchor_edges() {
        assert_eq!(
            placement_declarations(&Placement::bottom_right(-20.0, 10.0)),
            "right: -20em; bottom: 10em"
        );
        assert_eq!(
            placement_declarations(&Placement::top_left(7.5, 7.5)),
            "left: 7.5em; top: 7.5em"
        );
    }

    #[test]
    fn drift_declaration_is_omitted_without_offset() {
        assert_eq!(drift_declaration(&JitterOffset::ZERO), None);
        assert_eq!(
            drift_declaration(&JitterOffset::new(2.0, -2.0)).as_deref(),
            Some("transform: translate(2em, -2em)")
        );
    }

    #[test]
    fn stylesheet_embeds_palette_and_motion() {
        let css = default_stylesheet();
        assert!(css.contains(".dnt-wrapper.dark {"));
        assert!(css.contains("background: #1D1F2C;"));
        assert!(css.contains("transition: background 700ms"));
        assert!(css.contains("transform 1000ms ease-in-out"));
        assert!(css.contains("width: 180em;"));
        assert!(css.contains("width: 22em; height: 22em; left: 8em; top: 18em;"));
    }

    #[test]
    fn knob_rule_carries_knob_diameter() {
        let css = default_stylesheet();
        let rule_start = css.find(".dnt-knob {").expect("knob rule should exist");
        let rule = &css[rule_start..];
        let rule = &rule[..rule.find('}').expect("knob rule should close")];
        assert!(rule.contains("width: 55em;"));
        assert!(rule.contains("height: 55em;"));
        assert!(!css.contains("width: dnt-knob"));
    }

    #[test]
    fn stylesheet_reflects_custom_motion() {
        let motion = MotionTokens {
            toggle_ms: 0,
            ..MOTION_TOKENS
        };
        let css = stylesheet(
            motion,
            &default_color_tokens(ThemeMode::Light),
            &default_color_tokens(ThemeMode::Dark),
        );
        assert!(css.contains("transition: background 0ms"));
    }
}
