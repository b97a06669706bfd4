mod fixtures;

use qrframe::compositor::compose;
use qrframe::models::frame::{TextAlign, TextPosition};
use qrframe::models::studio::{ErrorCorrection, StudioConfig};
use qrframe::services::encoder::{QrcodeEncoder, SymbolEncoder};
use qrframe::services::fonts::FontRegistry;

const POSITIONS: [TextPosition; 4] = [
    TextPosition::Top,
    TextPosition::Bottom,
    TextPosition::Left,
    TextPosition::Right,
];
const ALIGNS: [TextAlign; 3] = [TextAlign::Left, TextAlign::Center, TextAlign::Right];
const CAPTIONS: [&str; 5] = [
    "Scan Me!",
    "A much longer call to action that needs several lines to fit",
    "Supercalifragilisticexpialidocious",
    "two\nlines",
    "WWWWWWWW",
];

fn assert_no_overlap(fonts: &FontRegistry) {
    let matrix = QrcodeEncoder.encode("https://example.com", ErrorCorrection::H).unwrap();
    for position in POSITIONS {
        for align in ALIGNS {
            for text in CAPTIONS {
                for font_size in [12, 16, 17, 32] {
                    for size in [128, 256, 400] {
                        let mut config = StudioConfig::default();
                        config.size = size;
                        config.frame.text_position = position;
                        config.frame.text_align = align;
                        config.frame.caption_text = text.to_string();
                        config.frame.font_size = font_size;
                        let scene = compose(&matrix, &config, fonts);
                        let caption = scene.caption.as_ref().unwrap();
                        let qr = scene.qr_bounds();
                        assert!(
                            !caption.layout.bounds.intersects(&qr),
                            "{:?}/{:?}/{}/{}: {:?} vs {:?}",
                            position,
                            align,
                            font_size,
                            size,
                            caption.layout.bounds,
                            qr
                        );
                        assert!(qr.right() <= scene.width && qr.bottom() <= scene.height);
                    }
                }
            }
        }
    }
}

#[test]
fn caption_never_overlaps_the_symbol_with_estimated_metrics() {
    assert_no_overlap(&FontRegistry::new());
}

#[test]
fn caption_never_overlaps_the_symbol_with_a_loaded_face() {
    assert_no_overlap(&fixtures::registry_with_fallback());
}

#[test]
fn vertical_anchors_follow_alignment() {
    let matrix = QrcodeEncoder.encode("x", ErrorCorrection::H).unwrap();
    for (align, expected) in [
        (TextAlign::Left, 20.0),
        (TextAlign::Center, 168.0),
        (TextAlign::Right, 316.0),
    ] {
        let mut config = StudioConfig::default();
        config.frame.text_align = align;
        let scene = compose(&matrix, &config, &FontRegistry::new());
        assert_eq!(scene.caption.unwrap().layout.anchor_x, expected);
    }
}

#[test]
fn lateral_caption_baseline_is_symbol_middle() {
    let matrix = QrcodeEncoder.encode("x", ErrorCorrection::H).unwrap();
    let fonts = fixtures::registry_with_fallback();
    for position in [TextPosition::Left, TextPosition::Right] {
        let mut config = StudioConfig::default();
        config.frame.text_position = position;
        let scene = compose(&matrix, &config, &fonts);
        assert_eq!(scene.caption.as_ref().unwrap().layout.baselines, vec![256.0 / 2.0 + 40.0]);
        assert_eq!(scene.qr_bounds().center().1, 168.0);
    }
}
