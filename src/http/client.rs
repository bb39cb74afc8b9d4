use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;
use tracing::debug;

use crate::constants::DEFAULT_REDIRECT_LIMIT;
use crate::error::TitleError;
use crate::http::fetch::{FetchedResponse, HttpFetch};
use crate::http::headers::{last_content_type, parse_headers};
use crate::types::Cli;

/// Transport settings for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout: u64,
    pub proxy: Option<String>,
    pub verify_ssl: bool,
    pub follow_redirect: bool,
    pub headers: Vec<String>,
    pub user_agent: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: 10,
            proxy: None,
            verify_ssl: false,
            follow_redirect: true,
            headers: Vec::new(),
            user_agent: None,
        }
    }
}

impl From<&Cli> for ClientSettings {
    fn from(cli: &Cli) -> Self {
        Self {
            timeout: cli.timeout,
            proxy: cli.proxy.clone(),
            verify_ssl: cli.verify_ssl,
            follow_redirect: cli.follow_redirect,
            headers: cli.headers.clone(),
            user_agent: cli.user_agent.clone(),
        }
    }
}

/// Build HTTP client from transport settings
pub fn build_http_client(settings: &ClientSettings) -> Result<Client> {
    let redirect_policy = if settings.follow_redirect {
        Policy::limited(DEFAULT_REDIRECT_LIMIT)
    } else {
        Policy::none()
    };

    let default_headers = parse_headers(&settings.headers);

    let mut client_builder = Client::builder()
        .timeout(Duration::from_secs(settings.timeout))
        .redirect(redirect_policy)
        .default_headers(default_headers);

    // Disable SSL verification by default
    if !settings.verify_ssl {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    if let Some(proxy_url) = &settings.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)?;
        client_builder = client_builder.proxy(proxy);
    }

    if let Some(user_agent) = &settings.user_agent {
        client_builder = client_builder.user_agent(user_agent.as_str());
    }

    Ok(client_builder.build()?)
}

/// [`HttpFetch`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Ok(Self::new(build_http_client(settings)?))
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<FetchedResponse, TitleError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let content_type = last_content_type(resp.headers());
        debug!(url, %status, ?content_type, "response received");

        Ok(FetchedResponse {
            status: status.as_u16(),
            content_type,
            body: Box::pin(resp.bytes_stream().map_err(TitleError::from)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::TitleExtractor;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP/1.1 response on a loopback port.
    async fn serve_once(head: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                head,
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("{}/", addr)
    }

    fn fetcher() -> ReqwestFetcher {
        // Loopback tests must not be routed through an environment proxy.
        ReqwestFetcher::new(Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn test_fetch_html_title_over_http() {
        let url = serve_once(
            "200 OK\r\nContent-Type: text/html; charset=ISO-8859-1",
            b"<html><head><title>Caf\xe9  Site</title></head></html>",
        )
        .await;

        let extractor = TitleExtractor::new(fetcher());
        let title = extractor.get_page_title(&url).await.unwrap();
        assert_eq!(title, Some("Café Site".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_processed() {
        let url = serve_once(
            "404 Not Found\r\nContent-Type: text/html",
            b"<title>Not Found</title>",
        )
        .await;

        let extractor = TitleExtractor::new(fetcher());
        let title = extractor.get_page_title(&url).await.unwrap();
        assert_eq!(title, Some("Not Found".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_missing_content_type() {
        let url = serve_once("200 OK", b"<title>Untyped</title>").await;

        let extractor = TitleExtractor::new(fetcher());
        let err = extractor.get_page_title(&url).await.unwrap_err();
        assert!(matches!(err, TitleError::MissingContentType));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let extractor = TitleExtractor::new(fetcher());
        let err = extractor
            .get_page_title(&format!("http://{}/", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, TitleError::Transport(_)));
    }

    #[test]
    fn test_build_http_client_settings() {
        let settings = ClientSettings {
            follow_redirect: false,
            headers: vec!["Accept-Language: en".to_string()],
            user_agent: Some("pagetitle-test".to_string()),
            ..ClientSettings::default()
        };
        assert!(build_http_client(&settings).is_ok());
    }
}
