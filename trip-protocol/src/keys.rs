//! API key sanity checks shared by the servers and the env validator.

use std::fmt;

const MIN_KEY_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStatus {
    Missing,
    /// Blank or still the `your_..._here` value from the template
    Placeholder,
    TooShort,
    Valid { masked: String },
}

impl KeyStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, KeyStatus::Valid { .. })
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStatus::Missing => write!(f, "Not set"),
            KeyStatus::Placeholder => write!(f, "Template value detected"),
            KeyStatus::TooShort => write!(f, "Too short (likely invalid)"),
            KeyStatus::Valid { masked } => write!(f, "{}", masked),
        }
    }
}

/// Keep the first 8 and last 4 characters visible
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        let head: String = chars.iter().take(8.min(chars.len())).collect();
        return format!("{}****", head);
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 12), tail)
}

pub fn check_api_key(value: Option<&str>) -> KeyStatus {
    let Some(value) = value else {
        return KeyStatus::Missing;
    };
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.to_lowercase().contains("your_") {
        return KeyStatus::Placeholder;
    }
    if trimmed.chars().count() < MIN_KEY_LEN {
        return KeyStatus::TooShort;
    }
    KeyStatus::Valid {
        masked: mask_key(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefghijklmnop"), "sk-abcde*******mnop");
        assert_eq!(mask_key("0123456789ab"), "01234567****");
    }

    #[test]
    fn test_check_api_key() {
        assert_eq!(check_api_key(None), KeyStatus::Missing);
        assert_eq!(check_api_key(Some("   ")), KeyStatus::Placeholder);
        assert_eq!(check_api_key(Some("your_openai_key_here")), KeyStatus::Placeholder);
        assert_eq!(check_api_key(Some("YOUR_KEY_GOES_HERE")), KeyStatus::Placeholder);
        assert_eq!(check_api_key(Some("short")), KeyStatus::TooShort);

        let status = check_api_key(Some("serper-1234567890"));
        assert!(status.is_valid());
        assert_eq!(status.to_string(), "serper-1*****7890");
    }
}
