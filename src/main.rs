//! Hex GUI
//!
//! A graphical interface for playing Hex against the engine or another player.

use hex::ui::HexApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Hex"),
        ..Default::default()
    };

    eframe::run_native(
        "Hex",
        options,
        Box::new(|cc| Ok(Box::new(HexApp::new(cc)?))),
    )
}
