use anyhow::Result;
use async_trait::async_trait;
use rust_mcp_sdk::mcp_server::{ServerHandler, ServerRuntime, server_runtime};
use rust_mcp_sdk::schema::schema_utils::CallToolError;
use rust_mcp_sdk::schema::{
    CallToolRequest, CallToolResult, Implementation, InitializeResult, LATEST_PROTOCOL_VERSION,
    ListToolsRequest, ListToolsResult, RpcError, ServerCapabilities, ServerCapabilitiesTools,
    TextContent, Tool,
};
use rust_mcp_sdk::{McpServer, StdioTransport, TransportOptions};
use serde_json::json;
use std::sync::Arc;

use crate::extractor::{ExtractOptions, TitleExtractor, parse_default_charset};
use crate::http::{ClientSettings, HttpFetch, ReqwestFetcher};
use crate::types::Cli;
use crate::utils::normalize_url;

const TOOL_NAME: &str = "get_page_title";

/// Run the MCP (Model Context Protocol) server
pub async fn run_mcp_server(cli: Cli) -> Result<()> {
    let server_details = InitializeResult {
        server_info: Implementation {
            name: "pagetitle".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some("HTML Title Fetcher".to_string()),
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some("Fetch web pages and return their HTML titles.".to_string()),
        protocol_version: LATEST_PROTOCOL_VERSION.to_string(),
    };

    let transport = StdioTransport::new(TransportOptions::default())
        .map_err(|e| anyhow::anyhow!("Failed to create stdio transport: {}", e))?;

    let options = ExtractOptions {
        default_charset: parse_default_charset(&cli.default_charset)?,
        ..ExtractOptions::default()
    };
    let handler = TitleServerHandler {
        settings: ClientSettings::from(&cli),
        options,
    };

    let server: Arc<ServerRuntime> =
        server_runtime::create_server(server_details, transport, handler);
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// Handler serving the title tool
struct TitleServerHandler {
    settings: ClientSettings,
    options: ExtractOptions,
}

#[async_trait]
impl ServerHandler for TitleServerHandler {
    async fn handle_list_tools_request(
        &self,
        _request: ListToolsRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: vec![Tool {
                name: TOOL_NAME.to_string(),
                description: Some("Fetch each URL and return the text of its HTML <title> element. Non-HTML responses and pages without a title yield a null title.".to_string()),
                input_schema: create_tool_input_schema(),
                annotations: None,
                meta: None,
                output_schema: None,
                title: Some("Get Page Title".to_string()),
            }],
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_call_tool_request(
        &self,
        request: CallToolRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        if request.tool_name() != TOOL_NAME {
            return Err(CallToolError::unknown_tool(format!(
                "Unknown tool: {}",
                request.tool_name()
            )));
        }

        let args = request.params.arguments.as_ref().ok_or_else(|| {
            CallToolError::new(
                RpcError::invalid_params().with_message("Missing arguments".to_string()),
            )
        })?;

        let urls = args.get("urls").and_then(|v| v.as_array()).ok_or_else(|| {
            CallToolError::new(
                RpcError::invalid_params()
                    .with_message("urls parameter must be an array".to_string()),
            )
        })?;

        let settings = extract_client_settings(args, &self.settings);
        let fetcher = ReqwestFetcher::from_settings(&settings).map_err(|e| {
            CallToolError::new(
                RpcError::internal_error()
                    .with_message(format!("Failed to build HTTP client: {}", e)),
            )
        })?;
        let extractor = TitleExtractor::with_options(fetcher, self.options);

        let results = fetch_titles(urls, &extractor).await;

        let result_text = results
            .iter()
            .map(|r| serde_json::to_string(r).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CallToolResult::text_content(vec![TextContent::from(
            result_text,
        )]))
    }
}

/// Apply per-call overrides on top of the CLI transport settings
fn extract_client_settings(
    args: &serde_json::Map<String, serde_json::Value>,
    defaults: &ClientSettings,
) -> ClientSettings {
    let mut settings = defaults.clone();

    if let Some(follow_redirect) = args.get("follow_redirect").and_then(|v| v.as_bool()) {
        settings.follow_redirect = follow_redirect;
    }

    if let Some(headers) = args.get("headers").and_then(|v| v.as_array()) {
        settings
            .headers
            .extend(headers.iter().filter_map(|v| v.as_str().map(|s| s.to_string())));
    }

    settings
}

/// Fetch titles one URL at a time and collect a JSON result per URL
async fn fetch_titles(
    urls: &[serde_json::Value],
    extractor: &TitleExtractor<impl HttpFetch>,
) -> Vec<serde_json::Value> {
    let mut results = Vec::new();

    for url in urls {
        let url_str = match url.as_str() {
            Some(s) => s.trim(),
            None => continue,
        };

        if url_str.is_empty() {
            continue;
        }

        let result = match extractor.get_page_title_with_status(url_str).await {
            Ok(page) => json!({
                "url": normalize_url(url_str),
                "status": page.status,
                "title": page.title,
            }),
            Err(err) => json!({
                "url": normalize_url(url_str),
                "error": err.to_string(),
            }),
        };
        results.push(result);
    }

    results
}

/// Create input schema for the get_page_title tool
fn create_tool_input_schema() -> rust_mcp_sdk::schema::ToolInputSchema {
    use std::collections::HashMap;

    let mut properties = HashMap::new();

    let mut urls_prop = serde_json::Map::new();
    urls_prop.insert("type".to_string(), json!("array"));
    urls_prop.insert(
        "description".to_string(),
        json!("URLs to fetch. A URL without a scheme is fetched over http://."),
    );
    urls_prop.insert("items".to_string(), json!({ "type": "string" }));
    properties.insert("urls".to_string(), urls_prop);

    let mut follow_redirect_prop = serde_json::Map::new();
    follow_redirect_prop.insert("type".to_string(), json!("boolean"));
    follow_redirect_prop.insert(
        "description".to_string(),
        json!("Whether to follow HTTP redirects. Defaults to the server setting."),
    );
    properties.insert("follow_redirect".to_string(), follow_redirect_prop);

    let mut headers_prop = serde_json::Map::new();
    headers_prop.insert("type".to_string(), json!("array"));
    headers_prop.insert(
        "description".to_string(),
        json!("Extra request headers (e.g., [\"Accept-Language: en\"])"),
    );
    headers_prop.insert("items".to_string(), json!({ "type": "string" }));
    properties.insert("headers".to_string(), headers_prop);

    const REQUIRED_FIELDS: &[&str] = &["urls"];
    rust_mcp_sdk::schema::ToolInputSchema::new(
        REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect(),
        Some(properties),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockFetcher, MockOutcome, TrackedStream};

    #[test]
    fn test_extract_client_settings_overrides() {
        let defaults = ClientSettings {
            headers: vec!["User-Agent: base".to_string()],
            ..ClientSettings::default()
        };
        let args = json!({
            "urls": ["example.com"],
            "follow_redirect": false,
            "headers": ["Accept-Language: en", 3],
        });
        let settings = extract_client_settings(args.as_object().unwrap(), &defaults);
        assert!(!settings.follow_redirect);
        assert_eq!(
            settings.headers,
            vec!["User-Agent: base", "Accept-Language: en"]
        );
    }

    #[tokio::test]
    async fn test_fetch_titles_results() {
        let body = TrackedStream::from_chunks(&[b"<title>Tool Page</title>"]);
        let extractor = TitleExtractor::new(MockFetcher::html("text/html", body));
        let urls = vec![json!("example.com"), json!(""), json!(42)];

        let results = fetch_titles(&urls, &extractor).await;
        assert_eq!(
            results,
            vec![json!({"url": "http://example.com", "status": 200, "title": "Tool Page"})]
        );
    }

    #[tokio::test]
    async fn test_fetch_titles_reports_errors() {
        let extractor = TitleExtractor::new(MockFetcher::new(MockOutcome::Refused));
        let results = fetch_titles(&[json!("https://down.example")], &extractor).await;
        assert_eq!(results[0]["url"], "https://down.example");
        assert!(results[0]["error"].as_str().unwrap().contains("refused"));
    }
}
