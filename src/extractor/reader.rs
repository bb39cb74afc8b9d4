use bytes::Bytes;
use encoding_rs::{CoderResult, Decoder, Encoding};
use futures::stream::{Stream, StreamExt};

use crate::error::Result;

/// Decoded text capped by character count.
///
/// Text is appended in runs of at most `chunk_chars` characters and the cap
/// is checked after each run, so the buffer may end up to `chunk_chars - 1`
/// characters over `max_chars`.
struct BoundedText {
    text: String,
    chars: usize,
    max_chars: usize,
    chunk_chars: usize,
}

impl BoundedText {
    fn new(max_chars: usize, chunk_chars: usize) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            max_chars,
            chunk_chars: chunk_chars.max(1),
        }
    }

    fn is_full(&self) -> bool {
        self.chars >= self.max_chars
    }

    fn append(&mut self, mut decoded: &str) {
        while !decoded.is_empty() && !self.is_full() {
            let split = decoded
                .char_indices()
                .nth(self.chunk_chars)
                .map_or(decoded.len(), |(i, _)| i);
            let (run, rest) = decoded.split_at(split);
            self.text.push_str(run);
            self.chars += run.chars().count();
            decoded = rest;
        }
    }
}

fn decode_chunk(decoder: &mut Decoder, mut src: &[u8], last: bool) -> String {
    let mut out = String::with_capacity(
        decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len()),
    );
    loop {
        let (result, read, _) = decoder.decode_to_string(src, &mut out, last);
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => return out,
            CoderResult::OutputFull => out.reserve(
                decoder
                    .max_utf8_buffer_length(src.len())
                    .unwrap_or(src.len())
                    .max(4),
            ),
        }
    }
}

/// Decode `body` with `encoding` until end of stream or until at least
/// `max_chars` characters have been collected.
///
/// The stream is consumed and dropped on every path, including a failed
/// chunk read.
pub async fn read_bounded<S>(
    mut body: S,
    encoding: &'static Encoding,
    max_chars: usize,
    chunk_chars: usize,
) -> Result<String>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    let mut decoder = encoding.new_decoder();
    let mut content = BoundedText::new(max_chars, chunk_chars);

    while !content.is_full() {
        match body.next().await {
            Some(chunk) => {
                let bytes = chunk?;
                content.append(&decode_chunk(&mut decoder, &bytes, false));
            }
            None => {
                content.append(&decode_chunk(&mut decoder, &[], true));
                break;
            }
        }
    }

    Ok(content.text)
}
