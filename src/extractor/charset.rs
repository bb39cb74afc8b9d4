use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, REPLACEMENT};

/// Map a charset label to its encoding.
///
/// Labels follow the WHATWG table, so `ISO-8859-1` and `latin1` both decode
/// as windows-1252. The "replacement" encoding is treated as unsupported
/// since it decodes every input to a single U+FFFD.
pub fn lookup_charset(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.as_bytes()).filter(|encoding| *encoding != REPLACEMENT)
}

/// Pick the encoding for a response body, falling back to `fallback` for
/// missing or unsupported charset names.
pub fn resolve_charset(
    charset_name: Option<&str>,
    fallback: &'static Encoding,
) -> &'static Encoding {
    charset_name.and_then(lookup_charset).unwrap_or(fallback)
}

/// Resolve the configured default charset, rejecting unknown labels.
pub fn parse_default_charset(label: &str) -> Result<&'static Encoding> {
    lookup_charset(label).ok_or_else(|| anyhow!("Unsupported default charset: {}", label))
}
