use colored::*;
use serde::Serialize;

pub const CSV_HEADER: &str = "url,status,title,error\n";

/// Outcome for one URL, ready for formatting
#[derive(Debug, Serialize)]
pub struct TitleRecord<'a> {
    pub url: &'a str,
    /// HTTP status, absent when the request itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Format record as plain text output
pub fn format_plain_output(
    record: &TitleRecord,
    template: &Option<String>,
    colored: bool,
) -> String {
    if let Some(template_str) = template {
        let status_str = record.status.map(|s| s.to_string()).unwrap_or_default();
        let mut output = template_str
            .replace("%url", record.url)
            .replace("%status", &status_str)
            .replace("%title", record.title.unwrap_or_default())
            .replace("%error", record.error.as_deref().unwrap_or_default());
        output.push('\n');
        return output;
    }

    match (&record.error, record.title) {
        (Some(err), _) => {
            if colored {
                format!("[{}] -> {}\n", record.url.cyan(), err.red())
            } else {
                format!("[{}] -> {}\n", record.url, err)
            }
        }
        (None, Some(title)) => {
            if colored {
                format!("[{}] -> {}\n", record.url.cyan(), title.green())
            } else {
                format!("[{}] -> {}\n", record.url, title)
            }
        }
        (None, None) => {
            if colored {
                format!("[{}] -> {}\n", record.url.cyan(), "(no title)".yellow())
            } else {
                format!("[{}] -> (no title)\n", record.url)
            }
        }
    }
}

/// Format record as a single JSON line
pub fn format_jsonl_output(record: &TitleRecord) -> String {
    serde_json::to_string(record).unwrap_or_default() + "\n"
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Format record as a CSV row matching [`CSV_HEADER`]
pub fn format_csv_output(record: &TitleRecord) -> String {
    format!(
        "{},{},{},{}\n",
        csv_field(record.url),
        csv_field(&record.status.map(|s| s.to_string()).unwrap_or_default()),
        csv_field(record.title.unwrap_or_default()),
        csv_field(record.error.as_deref().unwrap_or_default())
    )
}
