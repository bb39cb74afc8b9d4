use regex::Regex;
use std::sync::LazyLock;

static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>").expect("valid title regex"));

static TITLE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\x0B\x0C\r<>]+").expect("valid collapse regex"));

/// Extract title from HTML content
///
/// Runs of whitespace and angle brackets inside the title collapse to a
/// single space. Only ASCII whitespace collapses, and only ASCII control
/// characters and spaces are trimmed, so a non-breaking space is kept.
/// Nested markup is not stripped: `A<br>B` becomes `A br B`.
pub fn extract_title<'a>(content: impl Into<Option<&'a str>>) -> Option<String> {
    let content = content.into()?;
    let captures = TITLE_TAG.captures(content)?;
    let inner = captures.get(1)?.as_str();
    Some(
        TITLE_NOISE
            .replace_all(inner, " ")
            .trim_matches(|c: char| c <= ' ')
            .to_string(),
    )
}
