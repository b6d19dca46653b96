use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToggleError;

/// The two visual states of the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub const fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ToggleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(ToggleError::UnknownMode(value.to_string())),
        }
    }
}

/// Guess a mode from a desktop theme name such as `Adwaita-dark`.
///
/// Looks at the words of the name; a `dark` word wins over a `light` one.
pub fn mode_from_theme_name(theme_name: &str) -> Option<ThemeMode> {
    let mut guess = None;
    for word in theme_name
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .map(str::to_ascii_lowercase)
    {
        if word.starts_with("dark") {
            return Some(ThemeMode::Dark);
        }
        if word.starts_with("light") {
            guess = Some(ThemeMode::Light);
        }
    }
    guess
}

/// Per-mode palette for the sky, the knob and the decorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTokens {
    pub sky_background: String,
    pub sky_shadow: String,
    pub knob_fill: String,
    pub knob_shadow: String,
    pub crater_fill: String,
    pub layer_fill: String,
    pub cloud_primary: String,
    pub cloud_secondary: String,
    pub star_fill: String,
}

pub fn default_color_tokens(mode: ThemeMode) -> ColorTokens {
    match mode {
        ThemeMode::Light => ColorTokens {
            sky_background: "#3D7EAE".into(),
            sky_shadow: "rgba(0, 0, 0, 0.25)".into(),
            knob_fill: "#ECCA2F".into(),
            knob_shadow: "rgba(254, 255, 239, 0.61)".into(),
            crater_fill: "#959DB1".into(),
            layer_fill: "rgba(255, 255, 255, 0.10)".into(),
            cloud_primary: "#F3FDFF".into(),
            cloud_secondary: "#AACADF".into(),
            star_fill: "#FFFFFF".into(),
        },
        ThemeMode::Dark => ColorTokens {
            sky_background: "#1D1F2C".into(),
            sky_shadow: "rgba(0, 0, 0, 0.35)".into(),
            knob_fill: "#C4C9D1".into(),
            knob_shadow: "rgba(255, 255, 255, 0.24)".into(),
            crater_fill: "#959DB1".into(),
            layer_fill: "rgba(255, 255, 255, 0.06)".into(),
            cloud_primary: "#F3FDFF".into(),
            cloud_secondary: "#AACADF".into(),
            star_fill: "#FFFFFF".into(),
        },
    }
}
