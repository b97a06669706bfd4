use qrcode::QrCode;

use crate::error::EncodeError;
use crate::models::studio::ErrorCorrection;

/// Side length of a finder pattern, in modules.
pub const FINDER_SIZE: usize = 7;

/// Square grid of dark (`true`) and light modules, without quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
    level: ErrorCorrection,
}

impl QrMatrix {
    pub fn new(width: usize, modules: Vec<bool>, level: ErrorCorrection) -> Result<Self, EncodeError> {
        if modules.len() != width * width {
            return Err(EncodeError::Malformed {
                width,
                len: modules.len(),
            });
        }
        Ok(Self {
            width,
            modules,
            level,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn level(&self) -> ErrorCorrection {
        self.level
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    /// Top-left corners of the three finder patterns.
    pub fn finder_origins(&self) -> [(usize, usize); 3] {
        let far = self.width.saturating_sub(FINDER_SIZE);
        [(0, 0), (far, 0), (0, far)]
    }

    /// Whether a module belongs to one of the finder patterns.
    pub fn in_finder(&self, x: usize, y: usize) -> bool {
        self.finder_origins().iter().any(|&(fx, fy)| {
            (fx..fx + FINDER_SIZE).contains(&x) && (fy..fy + FINDER_SIZE).contains(&y)
        })
    }

    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.width)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_dark(x, y))
    }
}

/// Turns a payload into a module matrix.
pub trait SymbolEncoder {
    fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<QrMatrix, EncodeError>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrcodeEncoder;

impl SymbolEncoder for QrcodeEncoder {
    fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<QrMatrix, EncodeError> {
        // An empty symbol is not encodable; a single space stands in.
        let text = if payload.is_empty() { " " } else { payload };
        let code = QrCode::with_error_correction_level(text.as_bytes(), level.to_ec_level())?;
        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        log::trace!("Encoded {} bytes at level {:?} into {}x{}", text.len(), level, width, width);
        QrMatrix::new(width, modules, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_encodes_a_space() {
        let matrix = QrcodeEncoder.encode("", ErrorCorrection::L).unwrap();
        let space = QrcodeEncoder.encode(" ", ErrorCorrection::L).unwrap();
        assert_eq!(matrix, space);
        assert_eq!(matrix.width(), 21);
    }

    #[test]
    fn finder_patterns_are_dark_framed() {
        let matrix = QrcodeEncoder
            .encode("https://example.com", ErrorCorrection::H)
            .unwrap();
        for (fx, fy) in matrix.finder_origins() {
            assert!(matrix.is_dark(fx, fy));
            assert!(matrix.is_dark(fx + 6, fy + 6));
            assert!(!matrix.is_dark(fx + 1, fy + 1));
            assert!(matrix.is_dark(fx + 3, fy + 3));
        }
        assert!(matrix.in_finder(0, 0));
        assert!(!matrix.in_finder(8, 8));
    }

    #[test]
    fn higher_level_never_shrinks_symbol() {
        let low = QrcodeEncoder.encode("https://example.com", ErrorCorrection::L).unwrap();
        let high = QrcodeEncoder.encode("https://example.com", ErrorCorrection::H).unwrap();
        assert!(high.width() >= low.width());
        assert_eq!(high.level(), ErrorCorrection::H);
    }

    #[test]
    fn non_square_buffer_is_rejected() {
        let err = QrMatrix::new(3, vec![false; 8], ErrorCorrection::L).unwrap_err();
        assert!(matches!(err, EncodeError::Malformed { width: 3, len: 8 }));
        assert!(QrMatrix::new(3, vec![false; 9], ErrorCorrection::L).is_ok());
    }
}
