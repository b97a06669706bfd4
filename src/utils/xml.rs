/// Escape text for use in XML character data and attribute values.
/// Characters XML 1.0 does not allow are dropped.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{fffe}' || c == '\u{ffff}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Format a coordinate without trailing zeros.
pub fn num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    }

    #[test]
    fn drops_forbidden_control_characters() {
        assert_eq!(escape("Scan\u{1}Me\u{1b}!"), "ScanMe!");
        assert_eq!(escape("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn trims_numbers() {
        assert_eq!(num(40.0), "40");
        assert_eq!(num(168.5), "168.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
    }
}
