use eframe::NativeOptions;
use egui::viewport::ViewportBuilder;
use tracing::info;

use moon_phase::config::Config;
use moon_phase::error::MoonError;
use moon_phase::logging;
use moon_phase::ui::MoonPhaseApp;

fn main() -> Result<(), MoonError> {
    logging::init();

    let config = Config::default();
    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Moon Phase")
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let app = MoonPhaseApp::new(config)?;
    info!("Opening moon phase window");

    eframe::run_native(
        "Moon Phase",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(app)
        }),
    )?;
    Ok(())
}
