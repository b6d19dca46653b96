use std::f64::consts::{FRAC_PI_2, PI, TAU};

use gtk4::cairo::Context;
use gtk4::gdk::RGBA;

use crate::layout::{Anchor, Em, Placement, GEOMETRY};
use crate::theme::{default_color_tokens, ColorTokens, ThemeMode};
use crate::view::{CloudLayer, KnobFace, ToggleView};

/// Offset of the secondary cloud layer behind the primary one.
const SECONDARY_CLOUD_SHIFT: (f64, f64) = (-4.0, -6.0);

#[derive(Debug, Clone, Copy)]
struct Palette {
    sky: RGBA,
    knob: RGBA,
    crater: RGBA,
    layer: RGBA,
    cloud_primary: RGBA,
    cloud_secondary: RGBA,
    star: RGBA,
}

impl Palette {
    fn resolve(tokens: &ColorTokens) -> Self {
        Self {
            sky: parse_color(&tokens.sky_background),
            knob: parse_color(&tokens.knob_fill),
            crater: parse_color(&tokens.crater_fill),
            layer: parse_color(&tokens.layer_fill),
            cloud_primary: parse_color(&tokens.cloud_primary),
            cloud_secondary: parse_color(&tokens.cloud_secondary),
            star: parse_color(&tokens.star_fill),
        }
    }
}

fn parse_color(value: &str) -> RGBA {
    RGBA::parse(value).unwrap_or_else(|err| {
        tracing::warn!(?err, value, "invalid colour token; painting black");
        RGBA::BLACK
    })
}

/// Cairo renderer for a [`ToggleView`].
#[derive(Debug, Clone, Copy)]
pub struct ViewPainter {
    light: Palette,
    dark: Palette,
}

impl Default for ViewPainter {
    fn default() -> Self {
        Self::new(
            &default_color_tokens(ThemeMode::Light),
            &default_color_tokens(ThemeMode::Dark),
        )
    }
}

impl ViewPainter {
    pub fn new(light: &ColorTokens, dark: &ColorTokens) -> Self {
        Self {
            light: Palette::resolve(light),
            dark: Palette::resolve(dark),
        }
    }

    /// Natural pixel size of the switch at the view's font size.
    pub fn content_size(view: &ToggleView) -> (i32, i32) {
        let unit = view.root.font_size_px.max(0.0);
        (
            (GEOMETRY.wrapper_width.value() * unit).round() as i32,
            (GEOMETRY.wrapper_height.value() * unit).round() as i32,
        )
    }

    pub fn paint(&self, context: &Context, view: &ToggleView, width: i32, height: i32) {
        let unit = (f64::from(width) / GEOMETRY.wrapper_width.value())
            .min(f64::from(height) / GEOMETRY.wrapper_height.value());
        if unit <= 0.0 || !unit.is_finite() {
            return;
        }
        let palette = match view.mode() {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        };
        let canvas = Canvas { context, unit };

        context.save().ok();
        canvas.pill_path();
        context.clip();
        canvas.fill_rect(palette.sky);

        for layer in &view.layers {
            canvas.circle(&layer.placement, layer.diameter, palette.layer, (0.0, 0.0));
        }

        // Back layer first.
        for layer in [CloudLayer::Secondary, CloudLayer::Primary] {
            let (color, shift) = match layer {
                CloudLayer::Primary => (palette.cloud_primary, (0.0, 0.0)),
                CloudLayer::Secondary => (palette.cloud_secondary, SECONDARY_CLOUD_SHIFT),
            };
            for cloud in view
                .clouds
                .iter()
                .filter(|cloud| cloud.visible && cloud.layer == layer)
            {
                let offset = (
                    shift.0 + cloud.drift.dx.value(),
                    shift.1 + cloud.drift.dy.value(),
                );
                canvas.circle(&cloud.placement, GEOMETRY.cloud_diameter, color, offset);
            }
        }

        if view.star_field.visible {
            for star in &view.star_field.stars {
                canvas.star(&star.placement, star.size.diameter(), palette.star);
            }
        }

        canvas.circle(
            &view.knob.placement,
            view.knob.diameter,
            palette.knob,
            (0.0, 0.0),
        );
        if view.knob.face == KnobFace::Moon {
            let (knob_x, knob_y) = canvas.origin(&view.knob.placement, view.knob.diameter);
            for (origin, diameter) in GEOMETRY
                .crater_origins
                .iter()
                .zip(GEOMETRY.crater_diameters)
                .take(view.knob.visible_craters())
            {
                let radius = diameter.value() * unit / 2.0;
                context.arc(
                    knob_x + origin.horizontal.value() * unit + radius,
                    knob_y + origin.vertical.value() * unit + radius,
                    radius,
                    0.0,
                    TAU,
                );
                set_color(context, palette.crater);
                let _ = context.fill();
            }
        }
        context.restore().ok();
    }
}

struct Canvas<'a> {
    context: &'a Context,
    unit: f64,
}

impl Canvas<'_> {
    fn width(&self) -> f64 {
        GEOMETRY.wrapper_width.value() * self.unit
    }

    fn height(&self) -> f64 {
        GEOMETRY.wrapper_height.value() * self.unit
    }

    fn pill_path(&self) {
        let radius = self.height() / 2.0;
        let context = self.context;
        context.new_path();
        context.arc(radius, radius, radius, FRAC_PI_2, PI + FRAC_PI_2);
        context.arc(self.width() - radius, radius, radius, -FRAC_PI_2, FRAC_PI_2);
        context.close_path();
    }

    fn fill_rect(&self, color: RGBA) {
        self.context.rectangle(0.0, 0.0, self.width(), self.height());
        set_color(self.context, color);
        let _ = self.context.fill();
    }

    /// Top-left corner, in pixels, of a box of `diameter` at `placement`.
    fn origin(&self, placement: &Placement, diameter: Em) -> (f64, f64) {
        let size = diameter.value();
        let (x, y) = match placement.anchor {
            Anchor::TopLeft => (placement.horizontal.value(), placement.vertical.value()),
            Anchor::BottomRight => (
                GEOMETRY.wrapper_width.value() - placement.horizontal.value() - size,
                GEOMETRY.wrapper_height.value() - placement.vertical.value() - size,
            ),
        };
        (x * self.unit, y * self.unit)
    }

    fn circle(&self, placement: &Placement, diameter: Em, color: RGBA, offset: (f64, f64)) {
        let (x, y) = self.origin(placement, diameter);
        let radius = diameter.value() * self.unit / 2.0;
        self.context.arc(
            x + offset.0 * self.unit + radius,
            y + offset.1 * self.unit + radius,
            radius,
            0.0,
            TAU,
        );
        set_color(self.context, color);
        let _ = self.context.fill();
    }

    /// Four-pointed sparkle: each quadrant is a square with its inner corner
    /// scooped out.
    fn star(&self, placement: &Placement, diameter: Em, color: RGBA) {
        let (x, y) = self.origin(placement, diameter);
        let half = diameter.value() * self.unit / 2.0;
        let (cx, cy) = (x + half, y + half);
        let context = self.context;
        context.new_path();
        context.move_to(cx, y);
        context.curve_to(cx, cy, cx, cy, x + 2.0 * half, cy);
        context.curve_to(cx, cy, cx, cy, cx, y + 2.0 * half);
        context.curve_to(cx, cy, cx, cy, x, cy);
        context.curve_to(cx, cy, cx, cy, cx, y);
        context.close_path();
        set_color(context, color);
        let _ = context.fill();
    }
}

fn set_color(context: &Context, color: RGBA) {
    context.set_source_rgba(
        f64::from(color.red()),
        f64::from(color.green()),
        f64::from(color.blue()),
        f64::from(color.alpha()),
    );
}
