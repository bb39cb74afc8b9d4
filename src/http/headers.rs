use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

/// Parse header strings into HeaderMap
pub fn parse_headers(headers: &[String]) -> HeaderMap {
    let mut header_map = HeaderMap::new();
    for header_str in headers {
        if let Some((key, value)) = header_str.split_once(": ") {
            if let Ok(header_name) = HeaderName::from_bytes(key.as_bytes()) {
                if let Ok(header_value) = HeaderValue::from_str(value.trim()) {
                    header_map.insert(header_name, header_value);
                } else {
                    warn!("Invalid header value for key '{}'", key);
                }
            } else {
                warn!("Invalid header name: {}", key);
            }
        } else {
            warn!(
                "Invalid header format. Expected 'Key: Value'. Got: {}",
                header_str
            );
        }
    }
    header_map
}

/// Value of the last `Content-Type` header, decoded lossily.
///
/// A header that is present but not valid UTF-8 still counts as present.
pub fn last_content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(reqwest::header::CONTENT_TYPE)
        .iter()
        .last()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}
