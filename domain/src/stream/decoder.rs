//! Incremental decoding of the response body into frames.
//!
//! Network chunks arrive at arbitrary byte offsets: a UTF-8 code point or a
//! whole line may be split across two chunks. [`FrameDecoder`] carries both
//! kinds of partial state between calls so that a body decodes identically
//! however it was chunked.

use super::frame::{FrameParse, parse_frame};

/// Incremental UTF-8 decoder.
///
/// Bytes of an incomplete trailing code point are held back until the next
/// chunk completes them. Invalid sequences decode to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[len..];
                        }
                        None => {
                            // Incomplete sequence at the end of the input.
                            self.pending = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Number of bytes held back waiting for the rest of a code point.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Splits decoded text on `\n`, carrying the trailing fragment over.
#[derive(Debug, Default)]
pub struct LineBuffer {
    carry: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text and return every line completed by it (without `\n`).
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.carry.push_str(text);

        let Some(last_newline) = self.carry.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.carry.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.carry, rest);
        complete[..last_newline]
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    /// Consume the buffer, returning the incomplete line carried over.
    pub fn into_fragment(self) -> String {
        self.carry
    }
}

/// Leftover state when a body ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderRemainder {
    /// Unterminated final line.
    pub fragment: String,
    /// Bytes of an incomplete final code point.
    pub pending_bytes: usize,
}

impl DecoderRemainder {
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty() && self.pending_bytes == 0
    }
}

/// Byte chunks in, decoded frames out.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    utf8: Utf8StreamDecoder,
    lines: LineBuffer,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one network chunk into the frames it completes, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<FrameParse> {
        let text = self.utf8.decode(chunk);
        self.lines
            .push(&text)
            .iter()
            .map(|line| parse_frame(line))
            .collect()
    }

    /// Finish decoding. Whatever was not terminated by `\n` is returned
    /// undecoded; it never produces a frame.
    pub fn finish(self) -> DecoderRemainder {
        DecoderRemainder {
            fragment: self.lines.into_fragment(),
            pending_bytes: self.utf8.pending_len(),
        }
    }
}
