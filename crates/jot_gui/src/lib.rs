//! Jot editor library entry point.
//!
//! Exposes a `run` helper so the workspace root can launch the native window
//! without duplicating initialization logic.

mod app;
/// Host bridge: protocol, host contract, confirmation chain, worker.
pub mod backend;
/// Editor session state machine.
pub mod session;

use app::JotApp;
use eframe::egui;
use jot_core::constants::APP_NAME;
use jot_core::title::format_window_title;
use jot_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "jot=info,jot_gui=info,jot_core=info";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed by an embedding process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Start the editor window with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error, including app
/// creation failures when the host worker cannot be started.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = Config::from_env();
    info!(
        window = %config.window_label,
        recovery_dir = %config.recovery_dir,
        "starting {}",
        APP_NAME
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title(format_window_title(None, false)),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| match JotApp::new(cc, config) {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => Err(Box::new(err)),
        }),
    )
}
