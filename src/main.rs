mod config;
mod engine;
mod model;
mod ui;

use config::settings_io::SettingsStore;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let store = SettingsStore::load_default();
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "LanguageMentor",
        options,
        Box::new(|cc| Ok(Box::new(ui::app::TutorApp::new(cc, store)))),
    )
}
