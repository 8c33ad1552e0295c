//! HTTP Basic `Authorization` header parsing.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use agora_core::ports::AuthError;

/// Decode `Basic <base64(username:password)>` into its two parts.
///
/// The scheme name is matched case-insensitively (RFC 7617).
pub fn parse_basic_header(header: &str) -> Result<(String, String), AuthError> {
    let encoded = header
        .trim_start()
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Basic"))
        .map(|(_, encoded)| encoded)
        .ok_or_else(|| AuthError::MalformedHeader("expected Basic credentials".to_string()))?;

    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|_| AuthError::MalformedHeader("invalid base64".to_string()))?;
    let credentials = String::from_utf8(decoded)
        .map_err(|_| AuthError::MalformedHeader("credentials are not UTF-8".to_string()))?;

    let (username, password) = credentials
        .split_once(':')
        .ok_or_else(|| AuthError::MalformedHeader("missing ':' separator".to_string()))?;

    Ok((username.to_string(), password.to_string()))
}
