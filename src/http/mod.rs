pub mod client;
pub mod content_type;
pub mod fetch;
pub mod headers;

pub use client::{ClientSettings, ReqwestFetcher, build_http_client};
pub use content_type::{ContentTypeInfo, is_html};
pub use fetch::{BodyStream, FetchedResponse, HttpFetch};
pub use headers::{last_content_type, parse_headers};
