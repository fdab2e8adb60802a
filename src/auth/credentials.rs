//! HTTP credential headers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Parse an `Authorization: Basic <base64(email:password)>` value.
///
/// The password may itself contain `:`; only the first one separates.
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?.trim();
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// Extract the token from an `Authorization: Bearer <token>` value.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let header = format!("Basic {}", STANDARD.encode("bob@dylan.com:toto:1234"));
        let (email, password) = parse_basic(&header).unwrap();
        assert_eq!(email, "bob@dylan.com");
        assert_eq!(password, "toto:1234");
    }

    #[test]
    fn test_parse_basic_rejects_malformed() {
        assert!(parse_basic("Bearer abc").is_none());
        assert!(parse_basic("Basic !!!").is_none());
        let no_colon = format!("Basic {}", STANDARD.encode("nocolon"));
        assert!(parse_basic(&no_colon).is_none());
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc-123"), Some("abc-123"));
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Basic abc"), None);
    }
}
