pub mod formatter;

pub use formatter::{
    CSV_HEADER, TitleRecord, format_csv_output, format_jsonl_output, format_plain_output,
};
