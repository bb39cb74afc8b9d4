//! Fetch a URL and extract the text of its HTML `<title>` element.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use pagetitle::TitleExtractor;
//! use pagetitle::http::{ClientSettings, ReqwestFetcher};
//!
//! let fetcher = ReqwestFetcher::from_settings(&ClientSettings::default())?;
//! let title = TitleExtractor::new(fetcher).get_page_title("example.com").await?;
//! println!("{:?}", title);
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod extractor;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod output;
pub mod processor;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use error::TitleError;
pub use extractor::{ExtractOptions, PageTitle, TitleExtractor};
pub use http::ContentTypeInfo;
pub use utils::{extract_title, normalize_url};
