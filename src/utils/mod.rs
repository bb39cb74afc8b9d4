pub mod html;
pub mod url;

pub use html::extract_title;
pub use url::normalize_url;
