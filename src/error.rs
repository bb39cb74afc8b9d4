use thiserror::Error;

/// Errors raised while fetching a page title.
///
/// A page that is not HTML or has no `<title>` is not an error; those
/// outcomes are `Ok(None)`.
#[derive(Debug, Error)]
pub enum TitleError {
    /// The HTTP transport failed while sending the request or streaming the body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading the response body failed.
    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered without a `Content-Type` header.
    #[error("response has no Content-Type header")]
    MissingContentType,
}

pub type Result<T> = std::result::Result<T, TitleError>;
