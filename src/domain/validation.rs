use crate::domain::error::DomainError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IMAGE_URL: Regex =
        Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)$").expect("image url pattern");
}

pub const INVALID_IMAGE_URL: &str = "Please provide a valid image URL";

pub fn is_valid_image_url(url: &str) -> bool {
    IMAGE_URL.is_match(url)
}

pub fn validate_image(image: Option<&str>) -> Result<(), DomainError> {
    match image {
        Some(url) if !is_valid_image_url(url) => {
            Err(DomainError::Validation(INVALID_IMAGE_URL.to_string()))
        }
        _ => Ok(()),
    }
}

pub fn require_non_blank(value: &str, message: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(message.to_string()));
    }
    Ok(())
}

/// Lowercased, trimmed email, or a validation error when it does not look
/// like `local@domain`.
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Err(DomainError::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_accepts_common_formats() {
        assert!(is_valid_image_url("https://cdn.example.com/squat.jpg"));
        assert!(is_valid_image_url("http://example.com/a/b/bench.PNG"));
        assert!(is_valid_image_url("https://example.com/x.webp"));
    }

    #[test]
    fn test_image_url_rejects_other_values() {
        assert!(!is_valid_image_url("ftp://example.com/squat.jpg"));
        assert!(!is_valid_image_url("https://example.com/squat.pdf"));
        assert!(!is_valid_image_url("squat.jpg"));
        assert!(!is_valid_image_url("https://.jpg.exe"));
    }

    #[test]
    fn test_validate_image_allows_missing_image() {
        assert!(validate_image(None).is_ok());
        let err = validate_image(Some("nope")).unwrap_err();
        assert_eq!(err.to_string(), INVALID_IMAGE_URL);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
        assert!(normalize_email("alice").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("alice@").is_err());
        assert!(normalize_email("a@b@c").is_err());
    }
}
