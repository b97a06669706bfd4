use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::error::InputValidationError;
use crate::models::content::{ContentConfig, ContentKind};

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[\d\s-]{10,}$").expect("phone pattern is valid")
});

#[derive(Deserialize, Validate)]
pub struct UrlContent {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

#[derive(Deserialize, Validate)]
pub struct ContactEmail {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Value of a `Label: value` line, matched case-insensitively on the label
/// prefix.
fn field<'a>(payload: &'a str, label: &str) -> Option<&'a str> {
    payload.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .to_ascii_lowercase()
            .starts_with(label)
            .then(|| value.trim())
    })
}

fn validate_contact(payload: &str) -> Result<(), InputValidationError> {
    if let Some(email) = field(payload, "email").filter(|v| !v.is_empty()) {
        let request = ContactEmail {
            email: email.to_string(),
        };
        request
            .validate()
            .map_err(|_| InputValidationError::InvalidEmail)?;
    }
    if let Some(phone) = field(payload, "phone").filter(|v| !v.is_empty()) {
        if !PHONE_PATTERN.is_match(phone) {
            return Err(InputValidationError::InvalidPhone);
        }
    }
    Ok(())
}

fn validate_wifi(payload: &str) -> Result<(), InputValidationError> {
    // Raw `WIFI:S:<ssid>;...;` strings are accepted as typed.
    if let Some(raw) = payload.trim().strip_prefix("WIFI:") {
        let has_ssid = raw
            .split(';')
            .any(|part| part.strip_prefix("S:").is_some_and(|s| !s.is_empty()));
        return if has_ssid {
            Ok(())
        } else {
            Err(InputValidationError::MissingSsid)
        };
    }
    match field(payload, "network name").or_else(|| field(payload, "ssid")) {
        Some(ssid) if !ssid.is_empty() => Ok(()),
        _ => Err(InputValidationError::MissingSsid),
    }
}

/// Light validation driven by the content kind. The payload is encoded as
/// typed whatever the outcome; errors are only shown next to the field.
pub fn validate_content(content: &ContentConfig) -> Result<(), InputValidationError> {
    if content.payload.trim().is_empty() {
        return Ok(());
    }
    match content.content_kind {
        ContentKind::Text => Ok(()),
        ContentKind::Url => {
            let request = UrlContent {
                url: content.payload.trim().to_string(),
            };
            request
                .validate()
                .map_err(|_| InputValidationError::InvalidUrl)
        }
        ContentKind::Contact => validate_contact(&content.payload),
        ContentKind::Wifi => validate_wifi(&content.payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(payload: &str, kind: ContentKind) -> Result<(), InputValidationError> {
        validate_content(&ContentConfig::new(payload, kind))
    }

    #[test]
    fn url_kind_accepts_absolute_urls() {
        assert_eq!(check("https://example.com", ContentKind::Url), Ok(()));
        assert_eq!(
            check("example dot com", ContentKind::Url),
            Err(InputValidationError::InvalidUrl)
        );
    }

    #[test]
    fn text_kind_accepts_anything() {
        assert_eq!(check("<not a url>", ContentKind::Text), Ok(()));
    }

    #[test]
    fn contact_checks_email_and_phone_lines() {
        let ok = "Name: Ada\nPhone: +44 20 7946 0958\nEmail: ada@example.com\nAddress:";
        assert_eq!(check(ok, ContentKind::Contact), Ok(()));
        assert_eq!(
            check("Name: Ada\nEmail: ada.example.com", ContentKind::Contact),
            Err(InputValidationError::InvalidEmail)
        );
        assert_eq!(
            check("Phone: 12ab", ContentKind::Contact),
            Err(InputValidationError::InvalidPhone)
        );
        assert_eq!(check("Name:\nPhone:\nEmail:\nAddress:", ContentKind::Contact), Ok(()));
    }

    #[test]
    fn wifi_requires_ssid() {
        assert_eq!(
            check("Network Name (SSID): home\nPassword: x", ContentKind::Wifi),
            Ok(())
        );
        assert_eq!(check("WIFI:T:WPA;S:home;P:pw;;", ContentKind::Wifi), Ok(()));
        assert_eq!(
            check("Network Name (SSID):\nPassword: x", ContentKind::Wifi),
            Err(InputValidationError::MissingSsid)
        );
    }

    #[test]
    fn empty_payload_shows_no_error() {
        assert_eq!(check("", ContentKind::Url), Ok(()));
    }
}
