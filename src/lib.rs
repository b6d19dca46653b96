//! Animated day/night theme switch.
//!
//! The sun knob slides across a sky of drifting clouds and turns into a
//! cratered moon over a starfield. Hosts mount a [`DayNightToggle`] on a
//! [`Scheduler`], forward pointer input to it and paint [`view::render`]
//! output, either through [`render_html`] and [`stylesheet`] or through the
//! GTK painter behind the `gtk` feature.

pub mod animator;
#[cfg(feature = "gtk")]
pub mod app;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod scheduler;
pub mod state;
pub mod style;
pub mod theme;
pub mod view;
pub mod widget;

pub use config::{load_toggle_config, ToggleConfig};
pub use error::{ToggleError, ToggleResult};
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle};
pub use style::{default_stylesheet, stylesheet};
pub use theme::ThemeMode;
pub use view::{render, render_html, ToggleProps, ToggleView};
pub use widget::DayNightToggle;
