//! Error types for nav-data codec operations.
//!
//! The codecs draw a hard line between caller mistakes and wire damage.
//! Handing `encode` an unusable part list, or either codec a malformed
//! boundary token, is a bug in the caller and surfaces as a
//! [`ProtocolError`]. Damaged *input data* never does: the decoder
//! tokenizes whatever it is given and simply yields fewer (or emptier)
//! parts. The single exception is [`ProtocolError::NestingTooDeep`],
//! which guards recursion in both directions against resource
//! exhaustion.

use thiserror::Error;

/// Errors raised by the multipart codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// The boundary token violates the RFC 2046 grammar.
    ///
    /// Boundaries must be 1-70 characters from the bchars alphabet and
    /// must not end with a space.
    #[error("invalid boundary token: {reason}")]
    InvalidBoundary {
        /// What exactly the token got wrong.
        reason: String,
    },

    /// A part carries nested parts but no `content-type` header.
    ///
    /// The nested boundary parameter rides on the `content-type` field,
    /// so there is nowhere to put it.
    #[error("part has nested content but no content-type header to carry the boundary parameter")]
    NestedContentWithoutType,

    /// A part carries nested parts but its `content-type` already
    /// declares a `boundary` parameter.
    ///
    /// The encoder mints nested boundaries itself; a pre-existing
    /// parameter would either lie about the token actually used or
    /// produce a duplicate parameter.
    #[error("content-type already declares a boundary parameter")]
    BoundaryParameterPresent,

    /// Part nesting exceeds the configured recursion budget.
    #[error("multipart nesting depth {depth} exceeds the configured maximum {max_depth}")]
    NestingTooDeep {
        /// Depth at which the codec gave up, counting the outermost
        /// container as 1.
        depth: usize,
        /// The configured limit it ran into.
        max_depth: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProtocolError>;
