//! Turning the session into downloadable artifacts.

pub mod download;
pub mod raster;
pub mod vector;

use chrono::{NaiveDate, Utc};
use std::fmt;
use std::path::PathBuf;

use crate::compositor::compose;
use crate::error::ExportError;
use crate::export::download::DownloadSink;
use crate::export::raster::{PIXEL_DENSITY, Rasterizer, encode_jpeg, encode_png};
use crate::models::studio::ErrorCorrection;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to export: the payload is empty.
    Skipped,
    Saved(PathBuf),
    /// The failure was logged.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Capturing,
    Downloading,
    Failed,
}

/// `qrcode-YYYY-MM-DD.<ext>`
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("qrcode-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Runs exports against a sink, one at a time.
pub struct Exporter<S: DownloadSink> {
    sink: S,
    state: ExportState,
    pixel_density: u32,
    trail: Vec<ExportState>,
    today: fn() -> NaiveDate,
}

impl<S: DownloadSink> Exporter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: ExportState::Idle,
            pixel_density: PIXEL_DENSITY,
            trail: Vec::new(),
            today: utc_today,
        }
    }

    pub fn with_pixel_density(mut self, pixel_density: u32) -> Self {
        self.pixel_density = pixel_density.max(1);
        self
    }

    /// Replace the clock used for file names.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ExportState::Capturing | ExportState::Downloading)
    }

    /// States entered by the most recent export, in order.
    pub fn trail(&self) -> &[ExportState] {
        &self.trail
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn enter(&mut self, state: ExportState) {
        log::debug!("Export state {:?} -> {:?}", self.state, state);
        self.state = state;
        self.trail.push(state);
    }

    fn run<F>(&mut self, format: ExportFormat, session: &AppState, capture: F) -> ExportOutcome
    where
        F: FnOnce(&AppState) -> Result<Vec<u8>, ExportError>,
    {
        if session.config().content.is_empty() {
            log::debug!("Empty payload, skipping {} export", format);
            return ExportOutcome::Skipped;
        }

        self.trail.clear();
        self.enter(ExportState::Capturing);
        let result = capture(session).and_then(|bytes| {
            self.enter(ExportState::Downloading);
            let filename = export_filename(format, (self.today)());
            self.sink.deliver(&filename, &bytes)
        });

        let outcome = match result {
            Ok(path) => ExportOutcome::Saved(path),
            Err(e) => {
                log::error!("Error exporting {}: {}", format, e);
                self.enter(ExportState::Failed);
                ExportOutcome::Failed
            }
        };
        self.enter(ExportState::Idle);
        outcome
    }

    /// PNG of the live scene at the configured pixel density.
    pub fn export_raster(&mut self, session: &AppState) -> ExportOutcome {
        let density = self.pixel_density;
        self.run(ExportFormat::Png, session, |session| {
            let image = capture_live(session, density)?;
            encode_png(&image)
        })
    }

    /// JPEG of the live scene, flattened onto white.
    pub fn export_jpeg(&mut self, session: &AppState) -> ExportOutcome {
        let density = self.pixel_density;
        self.run(ExportFormat::Jpeg, session, |session| {
            let image = capture_live(session, density)?;
            encode_jpeg(&image)
        })
    }

    /// Standalone SVG, always encoded at the highest error correction.
    pub fn export_vector(&mut self, session: &AppState) -> ExportOutcome {
        self.run(ExportFormat::Svg, session, |session| {
            let config = session.config();
            log::debug!(
                "Vector export encodes at {:?} (session level {:?})",
                ErrorCorrection::MAX,
                config.error_correction
            );
            let matrix = session
                .encoder()
                .encode(&config.content.payload, ErrorCorrection::MAX)?;
            let scene = compose(&matrix, config, session.fonts());
            Ok(vector::to_svg(&scene).into_bytes())
        })
    }
}

fn capture_live(session: &AppState, density: u32) -> Result<image::RgbaImage, ExportError> {
    let scene = session
        .scene()
        .ok_or_else(|| ExportError::Capture("no rendered scene".to_string()))?;
    Rasterizer::new(session.fonts(), density).capture(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use crate::export::download::MemorySink;
    use crate::models::content::ContentKind;
    use crate::services::encoder::{QrMatrix, SymbolEncoder};

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn exporter() -> Exporter<MemorySink> {
        Exporter::new(MemorySink::new())
            .with_pixel_density(1)
            .with_clock(fixed_day)
    }

    struct BrokenEncoder;

    impl SymbolEncoder for BrokenEncoder {
        fn encode(&self, _: &str, _: ErrorCorrection) -> Result<QrMatrix, EncodeError> {
            Err(EncodeError::Symbol(qrcode::types::QrError::DataTooLong))
        }
    }

    #[test]
    fn filename_uses_date() {
        assert_eq!(export_filename(ExportFormat::Png, fixed_day()), "qrcode-2024-03-09.png");
        assert_eq!(export_filename(ExportFormat::Svg, fixed_day()), "qrcode-2024-03-09.svg");
    }

    #[test]
    fn empty_payload_is_skipped() {
        let session = AppState::new();
        let mut exporter = exporter();
        assert_eq!(exporter.export_raster(&session), ExportOutcome::Skipped);
        assert_eq!(exporter.export_vector(&session), ExportOutcome::Skipped);
        assert!(exporter.sink().files.is_empty());
        assert!(exporter.trail().is_empty());
    }

    #[test]
    fn successful_export_walks_the_states() {
        let mut session = AppState::new();
        session.set_payload("hello");
        let mut exporter = exporter();
        let outcome = exporter.export_vector(&session);
        assert_eq!(outcome, ExportOutcome::Saved(PathBuf::from("qrcode-2024-03-09.svg")));
        assert_eq!(
            exporter.trail(),
            &[ExportState::Capturing, ExportState::Downloading, ExportState::Idle]
        );
        assert!(!exporter.is_busy());
    }

    #[test]
    fn failure_is_logged_and_returns_to_idle() {
        let mut session = AppState::with_encoder(Box::new(BrokenEncoder));
        session.set_payload("hello");
        session.set_content_kind(ContentKind::Text);
        let mut exporter = exporter();
        assert_eq!(exporter.export_vector(&session), ExportOutcome::Failed);
        assert_eq!(exporter.export_raster(&session), ExportOutcome::Failed);
        assert_eq!(
            exporter.trail(),
            &[ExportState::Capturing, ExportState::Failed, ExportState::Idle]
        );
        assert_eq!(exporter.state(), ExportState::Idle);
        assert!(exporter.sink().files.is_empty());
    }

    #[test]
    fn raster_export_writes_png() {
        let mut session = AppState::new();
        session.set_payload("hello");
        let mut exporter = exporter();
        exporter.export_raster(&session);
        let (name, bytes) = exporter.sink().last().unwrap();
        assert_eq!(name, "qrcode-2024-03-09.png");
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
