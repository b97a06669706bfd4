use anyhow::{Context, Result, bail};
use dotenv::dotenv;
use env_logger::Env;
use std::env;
use std::fs;

use qrframe::config::settings::Settings;
use qrframe::export::download::DirectorySink;
use qrframe::export::{ExportOutcome, Exporter};
use qrframe::models::studio::StudioConfig;
use qrframe::services::encoder::QrcodeEncoder;
use qrframe::state::app_state::AppState;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env()?;

    let Some(session_path) = env::args().nth(1) else {
        bail!("usage: qrframe <session.json>");
    };
    let raw = fs::read_to_string(&session_path)
        .with_context(|| format!("Failed to read session file {}", session_path))?;
    let config: StudioConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid session file {}", session_path))?;

    let mut session = AppState::from_config(config, Box::new(QrcodeEncoder));
    match settings.fallback_font() {
        Some(path) => {
            if let Err(e) = session.load_fallback_font(&path) {
                log::warn!("Could not load font {}: {}", path.display(), e);
            }
        }
        None => log::warn!("No fallback font found; captions will be skipped in raster output"),
    }
    if let Some(err) = session.input_error() {
        log::warn!("{}", err);
    }

    let sink = DirectorySink::new(&settings.output_dir)?;
    let mut exporter = Exporter::new(sink).with_pixel_density(settings.pixel_density);

    let outcomes = [
        ("PNG", exporter.export_raster(&session)),
        ("SVG", exporter.export_vector(&session)),
    ];
    let mut failed = false;
    for (format, outcome) in outcomes {
        match outcome {
            ExportOutcome::Saved(path) => log::info!("{} written to {}", format, path.display()),
            ExportOutcome::Skipped => log::info!("{} skipped: no content to encode", format),
            ExportOutcome::Failed => failed = true,
        }
    }
    if failed {
        bail!("One or more exports failed");
    }
    Ok(())
}
