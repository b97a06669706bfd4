use std::path::Path;

use crate::compositor::{Scene, compose};
use crate::error::{FontLoadError, InputValidationError, LogoTooLarge};
use crate::models::color::Color;
use crate::models::content::ContentKind;
use crate::models::controls::{corner_radius_input, font_size_input, size_input};
use crate::models::frame::{
    CustomOptions, FontWeight, FrameStyle, GradientAngle, TextAlign, TextPosition,
};
use crate::models::studio::{ErrorCorrection, Logo, StudioConfig};
use crate::models::style::{CornerShape, ModuleShape};
use crate::services::encoder::{QrcodeEncoder, SymbolEncoder};
use crate::services::fonts::{FontHandle, FontRegistry};
use crate::structs::content_request::validate_content;
use crate::utils::data_uri;

/// One editing session: the configuration, its live rendering and the
/// resources it owns.
pub struct AppState {
    config: StudioConfig,
    encoder: Box<dyn SymbolEncoder>,
    fonts: FontRegistry,
    scene: Option<Scene>,
    input_error: Option<InputValidationError>,
    notice: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::from_config(StudioConfig::default(), Box::new(QrcodeEncoder))
    }

    pub fn with_encoder(encoder: Box<dyn SymbolEncoder>) -> Self {
        Self::from_config(StudioConfig::default(), encoder)
    }

    /// Start from a loaded configuration. Out-of-range sizes are clamped.
    pub fn from_config(mut config: StudioConfig, encoder: Box<dyn SymbolEncoder>) -> Self {
        let size = size_input(config.size);
        if size != config.size {
            log::warn!("Symbol size {} out of range, using {}", config.size, size);
            config.size = size;
        }
        let mut state = Self {
            config,
            encoder,
            fonts: FontRegistry::new(),
            scene: None,
            input_error: None,
            notice: None,
        };
        state.refresh();
        state
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// The live rendering. `None` only when the payload could not be encoded.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Load the face used when no caption family is registered.
    pub fn load_fallback_font(&mut self, path: &Path) -> Result<(), FontLoadError> {
        self.fonts.load_fallback_file(path)?;
        self.refresh();
        Ok(())
    }

    pub fn encoder(&self) -> &dyn SymbolEncoder {
        self.encoder.as_ref()
    }

    /// Validation message for the current content, shown inline.
    pub fn input_error(&self) -> Option<&InputValidationError> {
        self.input_error.as_ref()
    }

    /// Last rejected upload, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Re-validate and re-render after a change.
    pub fn refresh(&mut self) {
        self.input_error = validate_content(&self.config.content).err();
        match self
            .encoder
            .encode(&self.config.content.payload, self.config.error_correction)
        {
            Ok(matrix) => self.scene = Some(compose(&matrix, &self.config, &self.fonts)),
            Err(e) => {
                log::error!("Error generating QR code: {}", e);
                self.scene = None;
            }
        }
    }

    /// Apply an arbitrary edit, then re-render.
    pub fn update(&mut self, edit: impl FnOnce(&mut StudioConfig)) {
        edit(&mut self.config);
        self.refresh();
    }

    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.update(|c| c.content.payload = payload.into());
    }

    pub fn set_content_kind(&mut self, kind: ContentKind) {
        self.update(|c| c.content.content_kind = kind);
    }

    pub fn set_module_shape(&mut self, shape: ModuleShape) {
        self.update(|c| c.style.module_shape = shape);
    }

    pub fn set_corner_shape(&mut self, shape: CornerShape) {
        self.update(|c| c.style.corner_shape = shape);
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.update(|c| c.style.foreground = color);
    }

    pub fn set_background(&mut self, color: Color) {
        self.update(|c| c.style.background = color);
    }

    /// Checkbox toggle: transparent, or back to white.
    pub fn set_transparent_background(&mut self, transparent: bool) {
        let color = if transparent { Color::TRANSPARENT } else { Color::WHITE };
        self.set_background(color);
    }

    pub fn set_error_correction(&mut self, level: ErrorCorrection) {
        self.update(|c| c.error_correction = level);
    }

    pub fn set_size(&mut self, size: u32) {
        self.update(|c| c.size = size_input(size));
    }

    pub fn set_frame_style(&mut self, style: FrameStyle) {
        self.update(|c| c.frame.frame_style = style);
    }

    pub fn set_caption_text(&mut self, text: impl Into<String>) {
        self.update(|c| c.frame.caption_text = text.into());
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.update(|c| c.frame.font = font.into());
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.update(|c| c.frame.text_color = color);
    }

    pub fn set_text_position(&mut self, position: TextPosition) {
        self.update(|c| c.frame.text_position = position);
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.update(|c| c.frame.text_align = align);
    }

    pub fn set_container_background(&mut self, color: Color) {
        self.update(|c| c.frame.container_background = color);
    }

    /// Raw slider value, clamped to the control's range.
    pub fn set_corner_radius(&mut self, raw: i64) {
        self.update(|c| c.frame.corner_radius = corner_radius_input(raw));
    }

    /// Raw slider value, clamped to the control's range.
    pub fn set_font_size(&mut self, raw: i64) {
        self.update(|c| c.frame.font_size = font_size_input(raw));
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.update(|c| c.frame.font_weight = weight);
    }

    fn custom_options(&mut self, edit: impl FnOnce(&mut CustomOptions)) {
        self.update(|c| edit(c.frame.custom_options.get_or_insert_with(CustomOptions::default)));
    }

    pub fn set_gradient_start(&mut self, color: Color) {
        self.custom_options(|o| o.gradient_start = Some(color));
    }

    pub fn set_gradient_end(&mut self, color: Color) {
        self.custom_options(|o| o.gradient_end = Some(color));
    }

    pub fn set_gradient_direction(&mut self, angle: GradientAngle) {
        self.custom_options(|o| o.gradient_direction = Some(angle));
    }

    pub fn set_background_image(&mut self, bytes: &[u8], mime: &str) {
        let uri = data_uri::encode(mime, bytes);
        self.custom_options(|o| o.background_image = Some(uri));
    }

    pub fn clear_background_image(&mut self) {
        self.custom_options(|o| o.background_image = None);
    }

    /// Rejected uploads keep the previous logo.
    pub fn set_logo(&mut self, bytes: &[u8], mime: &str) -> Result<(), LogoTooLarge> {
        match Logo::from_bytes(bytes, mime) {
            Ok(logo) => {
                self.notice = None;
                self.update(|c| c.logo = Some(logo));
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected logo upload: {}", e);
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn clear_logo(&mut self) {
        self.update(|c| c.logo = None);
    }

    /// Register an uploaded font and select it for the caption. On failure
    /// the current font stays selected.
    pub fn upload_font(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<FontHandle, FontLoadError> {
        match self.fonts.register(file_name, bytes) {
            Ok(handle) => {
                self.notice = None;
                let family = handle.family().to_string();
                self.set_font(family);
                Ok(handle)
            }
            Err(e) => {
                log::error!("Error loading font {}: {}", file_name, e);
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Back to the default design. The payload is kept.
    pub fn reset(&mut self) {
        self.notice = None;
        self.update(StudioConfig::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Node;
    use crate::compositor::paint::Paint;
    use crate::error::EncodeError;
    use crate::models::studio::MAX_LOGO_BYTES;
    use crate::services::encoder::QrMatrix;

    #[test]
    fn starts_with_a_scene_for_the_defaults() {
        let state = AppState::new();
        let scene = state.scene().unwrap();
        assert_eq!(scene.width, 336.0);
        assert_eq!(scene.level, ErrorCorrection::H);
        assert!(state.input_error().is_none());
    }

    #[test]
    fn setters_rerender() {
        let mut state = AppState::new();
        state.set_payload("hello");
        let before = state.scene().unwrap().clone();
        state.set_caption_text("");
        let after = state.scene().unwrap();
        assert!(before.caption.is_some());
        assert!(after.caption.is_none());
        assert_eq!(after.height, 336.0);
    }

    #[test]
    fn invalid_url_is_reported_but_still_encoded() {
        let mut state = AppState::new();
        state.set_content_kind(ContentKind::Url);
        state.set_payload("not a url");
        assert_eq!(state.input_error(), Some(&InputValidationError::InvalidUrl));
        assert!(state.scene().is_some());
        state.set_payload("https://example.com");
        assert!(state.input_error().is_none());
    }

    #[test]
    fn sliders_clamp() {
        let mut state = AppState::new();
        state.set_font_size(99);
        state.set_corner_radius(-3);
        assert_eq!(state.config().frame.font_size, 32);
        assert_eq!(state.config().frame.corner_radius, 0);
    }

    #[test]
    fn oversized_logo_keeps_previous() {
        let mut state = AppState::new();
        state.set_logo(b"small", "image/png").unwrap();
        let previous = state.config().logo.clone();
        let err = state.set_logo(&vec![0; MAX_LOGO_BYTES + 1], "image/png").unwrap_err();
        assert_eq!(err.size, MAX_LOGO_BYTES + 1);
        assert_eq!(state.config().logo, previous);
        assert!(state.notice().is_some());
    }

    #[test]
    fn bad_font_keeps_current_selection() {
        let mut state = AppState::new();
        assert!(state.upload_font("font.woff2", vec![1, 2, 3]).is_err());
        assert_eq!(state.config().frame.font, "'Roboto', sans-serif");
        assert!(state.upload_font("broken.ttf", vec![1, 2, 3]).is_err());
        assert_eq!(state.config().frame.font, "'Roboto', sans-serif");
    }

    #[test]
    fn gradient_setters_fill_custom_options() {
        let mut state = AppState::new();
        state.set_frame_style(FrameStyle::Gradient);
        state.set_gradient_start(Color::rgb(0x11, 0x11, 0x11));
        state.set_gradient_end(Color::rgb(0xee, 0xee, 0xee));
        state.set_gradient_direction(GradientAngle(90.0));
        match &state.scene().unwrap().frame[0] {
            Node::Fill {
                paint: Paint::Linear(g),
                ..
            } => assert_eq!(g.angle, 90.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reset_keeps_payload() {
        let mut state = AppState::new();
        state.set_payload("keep");
        state.set_frame_style(FrameStyle::Minimal);
        state.set_transparent_background(true);
        state.reset();
        assert_eq!(state.config().content.payload, "keep");
        assert_eq!(state.config().frame.frame_style, FrameStyle::Modern);
        assert_eq!(state.config().style.background, Color::WHITE);
    }

    struct Refusing;

    impl SymbolEncoder for Refusing {
        fn encode(&self, _: &str, _: ErrorCorrection) -> Result<QrMatrix, EncodeError> {
            Err(EncodeError::Symbol(qrcode::types::QrError::DataTooLong))
        }
    }

    #[test]
    fn encode_failure_clears_scene() {
        let state = AppState::with_encoder(Box::new(Refusing));
        assert!(state.scene().is_none());
    }

    #[test]
    fn loaded_size_is_clamped() {
        let config = StudioConfig {
            size: 1_000_000,
            ..StudioConfig::default()
        };
        let state = AppState::from_config(config, Box::new(QrcodeEncoder));
        assert_eq!(state.config().size, 1024);
        assert_eq!(state.scene().unwrap().qr.size, 1024.0);
    }

    const DEJAVU: &[u8] = include_bytes!("../../tests/fixtures/fonts/DejaVuSans.ttf");

    #[test]
    fn uploaded_font_becomes_caption_font() {
        let mut state = AppState::new();
        state.set_text_position(TextPosition::Left);
        let estimated = state.scene().unwrap().caption.clone().unwrap();

        let handle = state.upload_font("Brand Sans.ttf", DEJAVU.to_vec()).unwrap();
        assert_eq!(handle.family(), "custom-font-Brand-Sans");
        assert_eq!(state.config().frame.font, "custom-font-Brand-Sans");
        assert!(state.fonts().contains("custom-font-Brand-Sans"));
        assert!(state.notice().is_none());

        // The caption is now measured with the uploaded face.
        let measured = state.scene().unwrap().caption.clone().unwrap();
        assert_ne!(estimated.layout.column.w, measured.layout.column.w);
    }

    #[test]
    fn fallback_font_rerenders_scene() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fallback.ttf");
        std::fs::write(&path, DEJAVU).unwrap();

        let mut state = AppState::new();
        state.set_text_position(TextPosition::Right);
        let before = state.scene().unwrap().width;
        state.load_fallback_font(&path).unwrap();
        assert!(state.fonts().has_fallback());
        assert_ne!(state.scene().unwrap().width, before);
    }
}
