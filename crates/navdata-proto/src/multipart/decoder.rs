//! Tokenizing wire containers back into part lists.
//!
//! The decoder is a character-level state machine over the raw input.
//! It never raises on damaged data; truncated or garbled containers
//! decode to whatever parts could be recovered, and the only error a
//! well-formed call can see is blowing the nesting budget. Boundary
//! matching is plain substring comparison, which is sound because
//! generated boundaries are 70 random characters and callers promise
//! not to embed the boundary in content.

use super::CodecConfig;
use crate::boundary::Boundary;
use crate::errors::{ProtocolError, Result};
use crate::media;
use crate::part::{BodyPart, Content, HeaderMap};

/// Scanner states, in the order a well-formed part visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Scanning for the next `--boundary` delimiter.
    SeekBoundary,
    /// Accumulating a header field name.
    HeaderName,
    /// Accumulating a header field body.
    HeaderBody,
    /// Probing a `;` in a field body for the `boundary=` parameter.
    HeaderParameter,
    /// Accumulating the part body up to the next delimiter.
    Body,
}

/// Decodes one container level.
///
/// `depth` counts containers, the outermost being 1; nested containers
/// recurse with `depth + 1` against the same budget the encoder uses.
pub(super) fn decode_container(
    input: &str,
    boundary: &Boundary,
    config: &CodecConfig,
    depth: usize,
) -> Result<Vec<BodyPart>> {
    if depth > config.max_depth {
        return Err(ProtocolError::NestingTooDeep {
            depth,
            max_depth: config.max_depth,
        });
    }
    Scanner::new(input, boundary).run(config, depth)
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// `--boundary`
    delimiter: Vec<u8>,
    /// `\r\n--boundary`, the body terminator.
    body_terminator: Vec<u8>,
    parts: Vec<BodyPart>,
    headers: HeaderMap,
    name: Vec<u8>,
    value: Vec<u8>,
    /// Boundary token captured from a `boundary=` parameter, pending
    /// until the part body is known.
    nested_boundary: Option<String>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, boundary: &Boundary) -> Self {
        let mut delimiter = Vec::with_capacity(2 + boundary.as_str().len());
        delimiter.extend_from_slice(b"--");
        delimiter.extend_from_slice(boundary.as_str().as_bytes());
        let mut body_terminator = Vec::with_capacity(2 + delimiter.len());
        body_terminator.extend_from_slice(b"\r\n");
        body_terminator.extend_from_slice(&delimiter);
        Self {
            bytes: input.as_bytes(),
            pos: 0,
            delimiter,
            body_terminator,
            parts: Vec::new(),
            headers: HeaderMap::new(),
            name: Vec::new(),
            value: Vec::new(),
            nested_boundary: None,
        }
    }

    fn run(mut self, config: &CodecConfig, depth: usize) -> Result<Vec<BodyPart>> {
        let mut state = DecoderState::SeekBoundary;
        loop {
            state = match state {
                DecoderState::SeekBoundary => {
                    if self.seek_next_part() {
                        DecoderState::HeaderName
                    } else {
                        return Ok(self.parts);
                    }
                }

                DecoderState::HeaderName => match self.byte() {
                    None => {
                        // Truncated inside the header block: a partial
                        // name is discarded, the part keeps what it has.
                        self.push_part(Content::Absent);
                        return Ok(self.parts);
                    }
                    Some(b'\r') if self.name.is_empty() && self.at(b"\r\n") => {
                        // Blank line: headers end, the body begins.
                        self.pos += 2;
                        DecoderState::Body
                    }
                    Some(b'\r') => {
                        // Line without a colon; drop it and rescan.
                        self.name.clear();
                        self.pos += 1;
                        DecoderState::HeaderName
                    }
                    Some(b':') => {
                        self.pos += 1;
                        self.value.clear();
                        DecoderState::HeaderBody
                    }
                    Some(byte) if is_field_name_byte(byte) => {
                        self.name.push(byte);
                        self.pos += 1;
                        DecoderState::HeaderName
                    }
                    Some(_) => {
                        // Spaces and strays between fields are skipped.
                        self.pos += 1;
                        DecoderState::HeaderName
                    }
                },

                DecoderState::HeaderBody => match self.byte() {
                    None => {
                        self.record_header();
                        self.push_part(Content::Absent);
                        return Ok(self.parts);
                    }
                    Some(b'\r') if self.at(b"\r\n") => {
                        if matches!(self.peek(2), Some(b' ' | b'\t')) {
                            // Folded line: absorb the CRLF, keep the
                            // folding whitespace in the value.
                            self.pos += 2;
                            DecoderState::HeaderBody
                        } else {
                            self.record_header();
                            self.pos += 2;
                            DecoderState::HeaderName
                        }
                    }
                    Some(b';') => DecoderState::HeaderParameter,
                    Some(byte) => {
                        self.value.push(byte);
                        self.pos += 1;
                        DecoderState::HeaderBody
                    }
                },

                DecoderState::HeaderParameter => {
                    match media::scan_boundary_parameter(self.bytes, self.pos) {
                        Some((token, next)) => {
                            // Later captures overwrite earlier ones. The
                            // parameter is consumed without touching the
                            // recorded value.
                            self.nested_boundary = Some(token);
                            self.pos = next;
                        }
                        None => {
                            // Not a boundary parameter; the `;` is
                            // ordinary field-body text.
                            self.value.push(b';');
                            self.pos += 1;
                        }
                    }
                    DecoderState::HeaderBody
                }

                DecoderState::Body => {
                    let start = self.pos;
                    let (end, resume) = if self.at(&self.delimiter) {
                        // The previous part ended flush against this
                        // delimiter; the body is empty.
                        (start, start)
                    } else {
                        match self.find(&self.body_terminator, start) {
                            Some(found) => (found, found + 2),
                            None => (self.bytes.len(), self.bytes.len()),
                        }
                    };
                    let text = String::from_utf8_lossy(&self.bytes[start..end]).into_owned();
                    let content = self.finish_content(text, config, depth)?;
                    self.push_part(content);
                    self.pos = resume;
                    DecoderState::SeekBoundary
                }
            };
        }
    }

    /// Advances past the next delimiter. Returns false when the closing
    /// delimiter (or the end of input) is reached.
    fn seek_next_part(&mut self) -> bool {
        let Some(found) = self.find(&self.delimiter, self.pos) else {
            return false;
        };
        self.pos = found + self.delimiter.len();
        if self.at(b"--") {
            // Closing delimiter; anything after it is epilogue.
            return false;
        }
        // Transport padding after the delimiter is tolerated.
        while matches!(self.byte(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
        if self.at(b"\r\n") {
            self.pos += 2;
        }
        true
    }

    /// Resolves the accumulated body text into part content, recursing
    /// when a nested boundary was captured from the headers.
    fn finish_content(
        &mut self,
        text: String,
        config: &CodecConfig,
        depth: usize,
    ) -> Result<Content> {
        let Some(token) = self.nested_boundary.take() else {
            return Ok(Content::Text(text));
        };
        match Boundary::new(token) {
            Ok(nested) => Ok(Content::Nested(decode_container(
                &text,
                &nested,
                config,
                depth + 1,
            )?)),
            Err(error) => {
                tracing::debug!(%error, "unusable nested boundary, keeping the part flat");
                Ok(Content::Text(text))
            }
        }
    }

    fn record_header(&mut self) {
        let name = String::from_utf8_lossy(&self.name).into_owned();
        let value = String::from_utf8_lossy(&self.value).into_owned();
        self.headers.insert(name, value);
        self.name.clear();
        self.value.clear();
    }

    fn push_part(&mut self, content: Content) {
        let headers = std::mem::take(&mut self.headers);
        self.parts.push(BodyPart { headers, content });
        self.name.clear();
        self.value.clear();
        self.nested_boundary = None;
    }

    fn byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Returns true if the input at the cursor starts with `needle`.
    fn at(&self, needle: &[u8]) -> bool {
        self.bytes.get(self.pos..self.pos + needle.len()) == Some(needle)
    }

    fn find(&self, needle: &[u8], from: usize) -> Option<usize> {
        let haystack = self.bytes.get(from..)?;
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|index| from + index)
    }
}

fn is_field_name_byte(byte: u8) -> bool {
    byte.is_ascii_graphic() && byte != b':'
}
