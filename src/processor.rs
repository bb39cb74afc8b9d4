use anyhow::{Result, bail};
use std::io::{self, BufRead};
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::warn;

use crate::extractor::{ExtractOptions, TitleExtractor, parse_default_charset};
use crate::http::{ClientSettings, HttpFetch, ReqwestFetcher};
use crate::output::{
    CSV_HEADER, TitleRecord, format_csv_output, format_jsonl_output, format_plain_output,
};
use crate::types::{Cli, OutputFormat};
use crate::utils::normalize_url;

/// Build the title extractor described by the CLI flags
pub fn build_extractor(cli: &Cli) -> Result<TitleExtractor<ReqwestFetcher>> {
    let options = ExtractOptions {
        default_charset: parse_default_charset(&cli.default_charset)?,
        ..ExtractOptions::default()
    };
    let fetcher = ReqwestFetcher::from_settings(&ClientSettings::from(cli))?;
    Ok(TitleExtractor::with_options(fetcher, options))
}

/// Fetch titles for the URLs on the command line, or from stdin if none
pub async fn process_urls(cli: &Cli, extractor: &TitleExtractor<impl HttpFetch>) -> Result<()> {
    let urls: Vec<String> = if cli.urls.is_empty() {
        io::stdin().lock().lines().map_while(Result::ok).collect()
    } else {
        cli.urls.clone()
    };

    let failures = if let Some(output_path) = &cli.output {
        let file = File::create(output_path).await?;
        let mut writer = BufWriter::new(file);
        let failures = write_titles(cli, extractor, &urls, &mut writer, false).await?;
        writer.flush().await?;
        failures
    } else {
        let mut stdout = tokio::io::stdout();
        let failures = write_titles(cli, extractor, &urls, &mut stdout, !cli.no_color).await?;
        stdout.flush().await?;
        failures
    };

    if failures > 0 {
        bail!("{} URL(s) could not be fetched", failures);
    }
    Ok(())
}

/// Fetch each URL in turn and write one record per URL; returns the failure count
async fn write_titles<W: AsyncWrite + Unpin>(
    cli: &Cli,
    extractor: &TitleExtractor<impl HttpFetch>,
    urls: &[String],
    writer: &mut W,
    colored: bool,
) -> Result<usize> {
    if let OutputFormat::Csv = cli.format {
        writer.write_all(CSV_HEADER.as_bytes()).await?;
    }

    let mut failures = 0;
    for line in urls {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        let outcome = extractor.get_page_title_with_status(url).await;
        let display_url = normalize_url(url);
        let record = match &outcome {
            Ok(page) => TitleRecord {
                url: &display_url,
                status: Some(page.status),
                title: page.title.as_deref(),
                error: None,
            },
            Err(err) => {
                warn!("[{}] - {}", display_url, err);
                failures += 1;
                TitleRecord {
                    url: &display_url,
                    status: None,
                    title: None,
                    error: Some(err.to_string()),
                }
            }
        };

        let output_str = match cli.format {
            OutputFormat::Plain => format_plain_output(&record, &cli.strf, colored),
            OutputFormat::Jsonl => format_jsonl_output(&record),
            OutputFormat::Csv => format_csv_output(&record),
        };
        writer.write_all(output_str.as_bytes()).await?;
    }

    Ok(failures)
}
