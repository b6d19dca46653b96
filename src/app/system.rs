use std::rc::Rc;

use gtk4::prelude::*;

use crate::theme::{mode_from_theme_name, ThemeMode};
use crate::widget::DayNightToggle;

const COLOR_SCHEME_PROPERTY: &str = "gtk-interface-color-scheme";

/// Best-effort read of the desktop colour scheme.
pub fn system_theme_mode_from_settings(settings: &gtk4::Settings) -> Option<ThemeMode> {
    if settings
        .list_properties()
        .iter()
        .any(|prop| prop.name() == COLOR_SCHEME_PROPERTY)
    {
        let color_scheme = settings.property_value(COLOR_SCHEME_PROPERTY);
        if let Ok(raw_scheme) = color_scheme.get::<i32>() {
            match raw_scheme {
                // GTK_INTERFACE_COLOR_SCHEME_FORCE_LIGHT
                3 => return Some(ThemeMode::Light),
                // GTK_INTERFACE_COLOR_SCHEME_FORCE_DARK
                2 => return Some(ThemeMode::Dark),
                _ => {}
            }
        }
    }

    if let Some(mode) = settings
        .gtk_theme_name()
        .and_then(|name| mode_from_theme_name(name.as_str()))
    {
        return Some(mode);
    }

    #[allow(deprecated)]
    let prefer_dark = settings.is_gtk_application_prefer_dark_theme();
    Some(ThemeMode::from_dark(prefer_dark))
}

/// Forward desktop scheme changes to `toggle` for as long as it is alive.
pub fn follow_system_scheme(settings: &gtk4::Settings, toggle: &Rc<DayNightToggle>) {
    let properties = [
        COLOR_SCHEME_PROPERTY,
        "gtk-theme-name",
        "gtk-application-prefer-dark-theme",
    ];
    for property in properties {
        if settings.find_property(property).is_none() {
            continue;
        }
        let toggle = Rc::downgrade(toggle);
        settings.connect_notify_local(Some(property), move |settings, _| {
            let Some(toggle) = toggle.upgrade() else {
                return;
            };
            if let Some(scheme) = system_theme_mode_from_settings(settings) {
                tracing::debug!(%scheme, property, "desktop colour scheme changed");
                toggle.system_scheme_changed(scheme);
            }
        });
    }
}
