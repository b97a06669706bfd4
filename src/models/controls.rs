//! Range limits enforced by the form controls. The model itself stores
//! whatever it is given.

pub const FONT_SIZE_RANGE: (u32, u32) = (12, 32);
pub const CORNER_RADIUS_RANGE: (u32, u32) = (0, 30);
/// Symbol side accepted from settings or session files.
pub const SIZE_RANGE: (u32, u32) = (64, 1024);

/// Font size slider.
pub fn font_size_input(raw: i64) -> u32 {
    raw.clamp(FONT_SIZE_RANGE.0 as i64, FONT_SIZE_RANGE.1 as i64) as u32
}

/// Corner radius slider.
pub fn corner_radius_input(raw: i64) -> u32 {
    raw.clamp(CORNER_RADIUS_RANGE.0 as i64, CORNER_RADIUS_RANGE.1 as i64) as u32
}

/// Symbol side in CSS pixels.
pub fn size_input(raw: u32) -> u32 {
    raw.clamp(SIZE_RANGE.0, SIZE_RANGE.1)
}
