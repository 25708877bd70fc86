//! Log Redaction Layer
//!
//! Scrubs API keys and access tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
/// AbuseIPDB keys are 80 lowercase hex characters.
static ABUSEIPDB_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9a-f]{80}\b").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    ABUSEIPDB_KEY_RE
        .replace_all(&redacted, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Mask a known secret: keep the first four characters, then `***`.
pub fn redact_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "***".to_string()
    } else {
        format!("{prefix}***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "Calling with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
    }

    #[test]
    fn redacts_abuseipdb_key() {
        let key = "a1".repeat(40);
        let clean = redact_sensitive_data(&format!("Key: {key}"));
        assert_eq!(clean, "Key: [REDACTED_TOKEN]");
    }

    #[test]
    fn leaves_ips_alone() {
        let raw = "GEOIP: Mountain View, US for 8.8.8.8";
        assert_eq!(redact_sensitive_data(raw), raw);
    }

    #[test]
    fn masks_known_secret() {
        assert_eq!(redact_secret("abcdef123456"), "abcd***");
        assert_eq!(redact_secret("abc"), "***");
    }
}
