mod app;
mod canvas;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state` resolves to the lib crate types
// everywhere in the binary.
pub use studyroom_gui_lib::state;

use app::StudyRoomApp;
use state::Preferences;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studyroom=info,studyroom_gui_lib=info".into()),
        )
        .init();

    // --demo starts with the sample room instead of an empty one
    let demo = std::env::args().skip(1).any(|arg| arg == "--demo");
    let preferences = Preferences::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Study Room")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "studyroom",
        native_options,
        Box::new(move |cc| Ok(Box::new(StudyRoomApp::new(cc, preferences, demo)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
