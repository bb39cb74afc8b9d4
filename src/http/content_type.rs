use regex::Regex;
use std::sync::LazyLock;

use crate::constants::HTML_MEDIA_TYPE;
use crate::error::{Result, TitleError};

static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is-u)charset=([-_a-zA-Z0-9]+)").expect("valid charset regex")
});

/// Media type and charset taken from a `Content-Type` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeInfo {
    media_type: String,
    charset: Option<String>,
}

impl ContentTypeInfo {
    /// Parse a raw `Content-Type` header value.
    ///
    /// The media type is everything before the first `;`, kept verbatim.
    /// The charset is looked up in the parameter section only; a malformed
    /// parameter section leaves it unset rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`TitleError::MissingContentType`] when the header is absent.
    pub fn parse(header_value: Option<&str>) -> Result<Self> {
        let header_value = header_value.ok_or(TitleError::MissingContentType)?;

        match header_value.split_once(';') {
            Some((media_type, params)) => Ok(Self {
                media_type: media_type.to_string(),
                charset: CHARSET_PARAM
                    .captures(params)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string()),
            }),
            None => Ok(Self {
                media_type: header_value.to_string(),
                charset: None,
            }),
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn is_html(&self) -> bool {
        is_html(Some(&self.media_type))
    }
}

/// True when the media type is `text/html`, ignoring ASCII case.
pub fn is_html(media_type: Option<&str>) -> bool {
    media_type.is_some_and(|t| t.eq_ignore_ascii_case(HTML_MEDIA_TYPE))
}
