use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Application, ApplicationWindow, Box as GtkBox, DrawingArea, Label, Orientation};

use crate::config::ToggleConfig;
use crate::style::MOTION_TOKENS;
use crate::theme::{default_color_tokens, ThemeMode};
use crate::view::class;
use crate::widget::DayNightToggle;

mod painter;
mod runtime_css;
mod scheduler;
mod system;

pub use painter::ViewPainter;
pub use scheduler::GlibScheduler;
pub use system::{follow_system_scheme, system_theme_mode_from_settings};

use self::runtime_css::{install_runtime_css, DEMO_ROOT_CLASS};

const APPLICATION_ID: &str = "io.github.daynight_toggle.Demo";

/// A mounted toggle and the drawing area it paints into.
///
/// The area keeps the toggle alive until it is destroyed, so it may be
/// unrealized and re-parented without losing its timers.
#[derive(Debug, Clone)]
pub struct ToggleWidget {
    area: DrawingArea,
    toggle: Rc<DayNightToggle>,
}

impl ToggleWidget {
    pub fn area(&self) -> &DrawingArea {
        &self.area
    }

    pub fn toggle(&self) -> &Rc<DayNightToggle> {
        &self.toggle
    }
}

pub fn build_toggle_widget(
    config: ToggleConfig,
    on_change: impl FnMut(ThemeMode) + 'static,
) -> ToggleWidget {
    let area = DrawingArea::new();
    area.add_css_class(class::ROOT);
    if let Some(extra) = config
        .class_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    {
        area.add_css_class(extra);
    }
    area.set_halign(Align::Center);
    area.set_valign(Align::Center);
    area.set_cursor_from_name(Some("pointer"));

    let follow_system = config.follow_system;
    let toggle = Rc::new(
        DayNightToggle::builder(config)
            .on_change(on_change)
            .mount(GlibScheduler::new(&area)),
    );

    let (width, height) = ViewPainter::content_size(&toggle.view());
    area.set_content_width(width);
    area.set_content_height(height);

    {
        let area = area.downgrade();
        toggle.connect_redraw(move || {
            if let Some(area) = area.upgrade() {
                area.queue_draw();
            }
        });
    }

    let painter = ViewPainter::default();
    {
        let toggle = Rc::downgrade(&toggle);
        area.set_draw_func(move |_, context, width, height| {
            if let Some(toggle) = toggle.upgrade() {
                painter.paint(context, &toggle.view(), width, height);
            }
        });
    }

    let click = gtk4::GestureClick::new();
    click.set_button(gtk4::gdk::BUTTON_PRIMARY);
    {
        let toggle = Rc::downgrade(&toggle);
        click.connect_pressed(move |_, _, _, _| {
            if let Some(toggle) = toggle.upgrade() {
                toggle.toggle();
            }
        });
    }
    area.add_controller(click);

    let pointer = gtk4::EventControllerMotion::new();
    {
        let toggle = Rc::downgrade(&toggle);
        pointer.connect_enter(move |_, _, _| {
            if let Some(toggle) = toggle.upgrade() {
                toggle.pointer_enter();
            }
        });
    }
    {
        let toggle = Rc::downgrade(&toggle);
        pointer.connect_motion(move |_, _, _| {
            if let Some(toggle) = toggle.upgrade() {
                toggle.pointer_moved();
            }
        });
    }
    {
        let toggle = Rc::downgrade(&toggle);
        pointer.connect_leave(move |_| {
            if let Some(toggle) = toggle.upgrade() {
                toggle.pointer_leave();
            }
        });
    }
    area.add_controller(pointer);

    if follow_system {
        match gtk4::Settings::default() {
            Some(settings) => follow_system_scheme(&settings, &toggle),
            None => tracing::warn!("no gtk settings available; not following system scheme"),
        }
    }

    {
        let owner = toggle.clone();
        area.connect_destroy(move |_| owner.unmount());
    }

    ToggleWidget { area, toggle }
}

/// Open a window hosting one toggle; the page follows the toggle's mode.
pub fn run_demo(config: ToggleConfig) -> anyhow::Result<()> {
    let application = Application::new(
        Some(APPLICATION_ID),
        gtk4::gio::ApplicationFlags::NON_UNIQUE,
    );

    application.connect_activate(move |app| {
        let light = default_color_tokens(ThemeMode::Light);
        let dark = default_color_tokens(ThemeMode::Dark);
        install_runtime_css(MOTION_TOKENS, &light, &dark);

        let mut config = config.clone();
        if config.follow_system {
            if let Some(mode) = gtk4::Settings::default()
                .as_ref()
                .and_then(system_theme_mode_from_settings)
            {
                config.theme = mode;
            }
        }
        tracing::info!(
            mode = %config.theme,
            follow_system = config.follow_system,
            "opening demo window"
        );

        let window = ApplicationWindow::new(app);
        window.add_css_class(DEMO_ROOT_CLASS);
        window.set_title(Some("Day / Night"));
        window.set_default_size(420, 260);
        apply_page_mode(&window, config.theme);

        let layout = GtkBox::new(Orientation::Vertical, 12);
        layout.set_valign(Align::Center);
        let caption = Label::new(Some(caption_for(config.theme)));

        let page = window.downgrade();
        let label = caption.clone();
        let toggle = build_toggle_widget(config, move |mode| {
            tracing::info!(%mode, "theme changed");
            if let Some(window) = page.upgrade() {
                apply_page_mode(&window, mode);
            }
            label.set_text(caption_for(mode));
        });

        layout.append(toggle.area());
        layout.append(&caption);
        window.set_child(Some(&layout));
        window.present();
    });

    let status = application.run_with_args::<&str>(&[]);
    if status != gtk4::glib::ExitCode::SUCCESS {
        anyhow::bail!("demo exited with status {status:?}");
    }
    Ok(())
}

fn apply_page_mode(window: &ApplicationWindow, mode: ThemeMode) {
    match mode {
        ThemeMode::Dark => window.add_css_class("dark"),
        ThemeMode::Light => window.remove_css_class("dark"),
    }
}

fn caption_for(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "Day",
        ThemeMode::Dark => "Night",
    }
}
