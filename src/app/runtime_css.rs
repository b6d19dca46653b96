use gtk4::CssProvider;

use crate::style::MotionTokens;
use crate::theme::ColorTokens;
use crate::view::class;

pub(super) const DEMO_ROOT_CLASS: &str = "daynight-demo";

pub(super) fn runtime_css(motion: MotionTokens, light: &ColorTokens, dark: &ColorTokens) -> String {
    format!(
        "
window.{demo} {{
  background: {light_page};
  transition: background {toggle_ms}ms ease;
}}
window.{demo}.dark {{
  background: {dark_page};
}}
window.{demo} label {{
  color: {light_text};
}}
window.{demo}.dark label {{
  color: {dark_text};
}}
.{root} {{
  margin: 24px;
}}
",
        demo = DEMO_ROOT_CLASS,
        root = class::ROOT,
        toggle_ms = motion.toggle_ms,
        light_page = light.cloud_primary,
        dark_page = dark.sky_background,
        light_text = dark.sky_background,
        dark_text = dark.star_fill,
    )
}

pub(super) fn install_runtime_css(motion: MotionTokens, light: &ColorTokens, dark: &ColorTokens) {
    let css = runtime_css(motion, light, dark);
    let provider = CssProvider::new();
    provider.load_from_data(&css);
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        tracing::warn!("no default display; runtime css not installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::MOTION_TOKENS;
    use crate::theme::{default_color_tokens, ThemeMode};

    #[test]
    fn runtime_css_switches_page_background_by_mode() {
        let css = runtime_css(
            MOTION_TOKENS,
            &default_color_tokens(ThemeMode::Light),
            &default_color_tokens(ThemeMode::Dark),
        );
        assert!(css.contains("window.daynight-demo.dark {\n  background: #1D1F2C;"));
        assert!(css.contains("transition: background 700ms ease;"));
    }
}
