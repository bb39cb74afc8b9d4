//! Fetch a page and pull out its `<title>`.

pub mod charset;
pub mod reader;

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use crate::constants::{MAX_TITLE_SCAN_CHARS, READ_CHUNK_CHARS};
use crate::error::Result;
use crate::http::{ContentTypeInfo, HttpFetch, ReqwestFetcher};
use crate::utils::{extract_title, normalize_url};

pub use charset::{lookup_charset, parse_default_charset, resolve_charset};
pub use reader::read_bounded;

/// Decoding limits for [`TitleExtractor`].
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Encoding used when the response names no charset or an unknown one.
    pub default_charset: &'static Encoding,
    /// Stop reading once this many characters have been decoded.
    pub max_chars: usize,
    /// Largest run of characters appended between cap checks.
    pub chunk_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_charset: UTF_8,
            max_chars: MAX_TITLE_SCAN_CHARS,
            chunk_chars: READ_CHUNK_CHARS,
        }
    }
}

/// Title of a fetched page together with the response status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle {
    pub status: u16,
    pub title: Option<String>,
}

/// Fetches URLs and extracts the HTML title of each.
///
/// Every call is independent; the extractor can be shared across tasks.
#[derive(Debug)]
pub struct TitleExtractor<F = ReqwestFetcher> {
    fetcher: F,
    options: ExtractOptions,
}

impl<F: HttpFetch> TitleExtractor<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_options(fetcher, ExtractOptions::default())
    }

    pub fn with_options(fetcher: F, options: ExtractOptions) -> Self {
        Self { fetcher, options }
    }

    /// Fetch `url` and return the text of its `<title>` element.
    ///
    /// Returns `Ok(None)` for non-HTML responses (without reading the body)
    /// and for HTML pages whose first `max_chars` characters contain no
    /// title. The HTTP status is not inspected.
    ///
    /// # Errors
    ///
    /// Transport failures are returned as they come from the fetcher. A
    /// response without a `Content-Type` header yields
    /// [`TitleError::MissingContentType`](crate::error::TitleError::MissingContentType).
    pub async fn get_page_title(&self, url: &str) -> Result<Option<String>> {
        Ok(self.get_page_title_with_status(url).await?.title)
    }

    /// Like [`get_page_title`](Self::get_page_title), also reporting the
    /// HTTP status of the response.
    pub async fn get_page_title_with_status(&self, url: &str) -> Result<PageTitle> {
        let url = normalize_url(url);
        let response = self.fetcher.get(&url).await?;
        let status = response.status;

        let content_type = ContentTypeInfo::parse(response.content_type.as_deref())?;
        if !content_type.is_html() {
            debug!(
                url = %url,
                media_type = content_type.media_type(),
                "skipping non-HTML response"
            );
            return Ok(PageTitle {
                status,
                title: None,
            });
        }

        let encoding = resolve_charset(content_type.charset(), self.options.default_charset);
        debug!(url = %url, encoding = encoding.name(), "reading body");

        let content = read_bounded(
            response.body,
            encoding,
            self.options.max_chars,
            self.options.chunk_chars,
        )
        .await?;

        Ok(PageTitle {
            status,
            title: extract_title(content.as_str()),
        })
    }
}
