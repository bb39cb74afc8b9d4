use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;

use crate::error::Result;

/// Response body as a stream of raw byte chunks.
///
/// Dropping the stream releases the underlying connection.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Headers and body of a fetched page.
pub struct FetchedResponse {
    pub status: u16,
    /// Raw `Content-Type` header value, if the server sent one.
    pub content_type: Option<String>,
    pub body: BodyStream,
}

impl std::fmt::Debug for FetchedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Capability to issue a GET request against an absolute URL.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedResponse>;
}
