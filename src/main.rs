use daynight_toggle::{app, config, logging};

fn main() -> anyhow::Result<()> {
    logging::init();
    let config = config::load_toggle_config();
    tracing::info!(mode = %config.theme, scale = config.scale, "starting day/night demo");
    app::run_demo(config)
}
