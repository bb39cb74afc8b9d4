/// HTTP constants
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;

/// URL constants
pub const SCHEME_SEPARATOR: &str = "://";
pub const DEFAULT_SCHEME: &str = "http://";

/// Content negotiation constants
pub const HTML_MEDIA_TYPE: &str = "text/html";
pub const DEFAULT_CHARSET_LABEL: &str = "utf-8";

/// Bounded read constants
pub const MAX_TITLE_SCAN_CHARS: usize = 8192;
pub const READ_CHUNK_CHARS: usize = 1024;
