use clap::Parser;

use crate::constants::DEFAULT_CHARSET_LABEL;

/// Output format options
#[derive(clap::ValueEnum, Debug, Clone, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Jsonl,
    Csv,
}

/// Fetch the HTML title of each URL given as an argument or on stdin.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URLs to fetch. Read line by line from stdin when omitted.
    pub urls: Vec<String>,

    // NETWORK
    /// Timeout for each request in seconds.
    #[arg(long, default_value_t = 10, help_heading = "NETWORK")]
    pub timeout: u64,

    /// Use a proxy for requests (e.g., "http://127.0.0.1:8080").
    #[arg(long, help_heading = "NETWORK")]
    pub proxy: Option<String>,

    /// Verify SSL certificates (default: false, insecure).
    #[arg(long, default_value_t = false, help_heading = "NETWORK")]
    pub verify_ssl: bool,

    // HTTP
    /// Whether to follow HTTP redirects.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, help_heading = "HTTP")]
    pub follow_redirect: bool,

    /// Custom headers to add to the request (e.g., "Accept-Language: en").
    #[arg(short = 'H', long, help_heading = "HTTP")]
    pub headers: Vec<String>,

    /// User-Agent sent with each request.
    #[arg(long, help_heading = "HTTP")]
    pub user_agent: Option<String>,

    // DECODING
    /// Charset used when a page declares none or an unsupported one.
    #[arg(long, default_value = DEFAULT_CHARSET_LABEL, help_heading = "DECODING")]
    pub default_charset: String,

    // OUTPUT
    /// Output file to save results (instead of stdout).
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, help_heading = "OUTPUT")]
    pub format: OutputFormat,

    #[arg(
        short = 'S',
        long,
        help_heading = "OUTPUT",
        long_help = "Custom format string for plain output (e.g. \"%url => %title\").\nPlaceholders: %url, %status, %title, %error"
    )]
    pub strf: Option<String>,

    /// Disable color output.
    #[arg(long, help_heading = "OUTPUT")]
    pub no_color: bool,

    /// Log debug details to stderr.
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,

    // MCP
    /// Run in MCP (Model Context Protocol) server mode.
    #[arg(long, help_heading = "MCP")]
    pub mcp: bool,
}
