//! The `multipart/nav-data` container codec.
//!
//! Containers follow the restricted RFC 2046 profile used on the wire:
//!
//! ```text
//! --boundary\r\n
//! name:value\r\n        (zero or more header fields)
//! \r\n                  (only when a non-empty body follows)
//! body
//! \r\n--boundary\r\n    (separator before each further part)
//! ...
//! \r\n--boundary--      (closing delimiter)
//! ```
//!
//! Nested containers ride inside a part body; the part's `content-type`
//! carries the nested boundary as a quoted `boundary` parameter. The
//! encoder mints nested boundaries itself and the decoder strips the
//! parameter back out, so a decode/encode pass reproduces the original
//! wire apart from freshly minted tokens.
//!
//! # Errors
//!
//! Both directions only raise for caller mistakes (bad boundary token,
//! unencodable part list) and for blowing the nesting budget. Damaged
//! input never raises; the decoder records what it can.

mod decoder;
mod encoder;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::boundary::{Boundary, BoundaryGenerator};
use crate::errors::Result;
use crate::part::BodyPart;

pub(crate) const CRLF: &str = "\r\n";

/// Limits applied by both codec directions.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Maximum container nesting, counting the outermost container as 1.
    pub max_depth: usize,
}

impl CodecConfig {
    /// Nesting budget applied by [`CodecConfig::default`].
    pub const DEFAULT_MAX_DEPTH: usize = 16;
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Encoder/decoder for multipart containers.
///
/// The codec owns a [`BoundaryGenerator`] for minting nested boundary
/// tokens during encoding. Production code uses [`MultipartCodec::new`];
/// tests that need reproducible wire output seed the generator through
/// [`MultipartCodec::from_rng`].
///
/// # Examples
///
/// ```
/// use navdata_proto::multipart::MultipartCodec;
/// use navdata_proto::part::BodyPart;
///
/// let mut codec = MultipartCodec::new();
/// let parts = vec![BodyPart::text("hello")];
/// let wire = codec.encode(&parts, "simple boundary")?;
/// assert_eq!(codec.decode(&wire, "simple boundary")?, parts);
/// # Ok::<(), navdata_proto::ProtocolError>(())
/// ```
#[derive(Debug)]
pub struct MultipartCodec<R = ThreadRng> {
    config: CodecConfig,
    boundaries: BoundaryGenerator<R>,
}

impl MultipartCodec<ThreadRng> {
    /// Creates a codec with default limits and a thread-local RNG.
    pub fn new() -> Self {
        Self {
            config: CodecConfig::default(),
            boundaries: BoundaryGenerator::new(),
        }
    }
}

impl Default for MultipartCodec<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MultipartCodec<R> {
    /// Creates a codec whose boundary generator draws from `rng`.
    pub fn from_rng(rng: R) -> Self {
        Self {
            config: CodecConfig::default(),
            boundaries: BoundaryGenerator::from_rng(rng),
        }
    }

    /// Replaces the codec limits.
    #[must_use]
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// The limits currently in force.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serializes `parts` into a container delimited by `boundary`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProtocolError::InvalidBoundary`] for a malformed
    /// token, [`crate::ProtocolError::NestedContentWithoutType`] or
    /// [`crate::ProtocolError::BoundaryParameterPresent`] for unusable
    /// nested parts, and [`crate::ProtocolError::NestingTooDeep`] when
    /// the part tree exceeds the configured depth.
    pub fn encode(&mut self, parts: &[BodyPart], boundary: &str) -> Result<String> {
        let boundary = Boundary::new(boundary)?;
        encoder::encode_container(parts, &boundary, &mut self.boundaries, &self.config, 1)
    }

    /// Serializes `parts` under a freshly generated boundary.
    ///
    /// Returns the minted boundary alongside the wire text so the caller
    /// can advertise it, typically via
    /// [`crate::media::content_type_with_boundary`].
    pub fn encode_generated(&mut self, parts: &[BodyPart]) -> Result<(Boundary, String)> {
        let boundary = self.boundaries.generate();
        let wire = encoder::encode_container(parts, &boundary, &mut self.boundaries, &self.config, 1)?;
        Ok((boundary, wire))
    }

    /// Tokenizes a container delimited by `boundary` back into parts.
    ///
    /// Malformed input degrades to fewer or emptier parts rather than
    /// failing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProtocolError::InvalidBoundary`] for a malformed
    /// token and [`crate::ProtocolError::NestingTooDeep`] when nested
    /// containers exceed the configured depth.
    pub fn decode(&self, input: &str, boundary: &str) -> Result<Vec<BodyPart>> {
        let boundary = Boundary::new(boundary)?;
        decoder::decode_container(input, &boundary, &self.config, 1)
    }
}
