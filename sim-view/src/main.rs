//! Application entry point for the nucleus viewer.
//!
//! This binary sets up logging and eframe/egui, then delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Logging goes through `env_logger`; set `RUST_LOG=debug` to follow
/// attachments, removals and finished ejections.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Nucleus",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
