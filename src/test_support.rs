//! Stream and transport doubles shared by the async tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use crate::error::{Result, TitleError};
use crate::http::{FetchedResponse, HttpFetch};

/// Body stream that records how often it was polled and dropped.
pub struct TrackedStream {
    chunks: VecDeque<Result<Bytes>>,
    polls: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl TrackedStream {
    pub fn new(chunks: Vec<Result<Bytes>>) -> Self {
        Self {
            chunks: chunks.into(),
            polls: Arc::new(AtomicUsize::new(0)),
            drops: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_chunks(chunks: &[&[u8]]) -> Self {
        Self::new(
            chunks
                .iter()
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect(),
        )
    }

    pub fn polls(&self) -> Arc<AtomicUsize> {
        self.polls.clone()
    }

    pub fn drops(&self) -> Arc<AtomicUsize> {
        self.drops.clone()
    }
}

impl Stream for TrackedStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(self.chunks.pop_front())
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Canned outcome for [`MockFetcher`].
pub enum MockOutcome {
    Response {
        content_type: Option<&'static str>,
        body: TrackedStream,
    },
    Refused,
}

/// [`HttpFetch`] returning a single prepared response.
pub struct MockFetcher {
    status: u16,
    outcome: std::sync::Mutex<Option<MockOutcome>>,
    requested: std::sync::Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            status: 200,
            outcome: std::sync::Mutex::new(Some(outcome)),
            requested: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn html(content_type: &'static str, body: TrackedStream) -> Self {
        Self::new(MockOutcome::Response {
            content_type: Some(content_type),
            body,
        })
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetch for MockFetcher {
    async fn get(&self, url: &str) -> Result<FetchedResponse> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.outcome.lock().unwrap().take() {
            Some(MockOutcome::Response { content_type, body }) => Ok(FetchedResponse {
                status: self.status,
                content_type: content_type.map(str::to_string),
                body: Box::pin(body),
            }),
            Some(MockOutcome::Refused) | None => Err(TitleError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}
