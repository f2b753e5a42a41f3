use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use cmdb_console::CmdbApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("CMDB Console"),
        ..Default::default()
    };

    eframe::run_native(
        "CMDB Console",
        options,
        Box::new(|cc| Ok(Box::new(CmdbApp::new(cc)?))),
    )
    .map_err(|e| anyhow!("failed to start ui: {e}"))
}
