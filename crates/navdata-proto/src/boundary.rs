//! Boundary tokens and their generation.
//!
//! RFC 2046 constrains boundary tokens to 1-70 characters drawn from a
//! 75-symbol alphabet (`bchars`), with the extra rule that the final
//! character must not be a space. [`Boundary`] is the validated form of
//! such a token; [`BoundaryGenerator`] mints fresh maximum-length tokens
//! from a caller-supplied RNG so tests can pin the randomness down.
//!
//! Generated tokens are always the full 70 characters. With 74-75
//! symbols per position the chance of a generated token colliding with
//! enclosed content is negligible, which is what lets the decoder get
//! away with plain substring scanning.

use std::fmt;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::errors::{ProtocolError, Result};

/// The RFC 2046 `bchars` alphabet. The space must stay in the final
/// position so [`BCHARS_NOSPACE`] can be taken as a prefix.
pub const BCHARS: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz'()+_,-./:=? ";

/// The `bcharsnospace` subset, legal in any position including the last.
pub const BCHARS_NOSPACE: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz'()+_,-./:=?";

/// Returns true if `byte` may appear in a boundary token.
pub(crate) fn is_bchar(byte: u8) -> bool {
    byte == b' ' || is_bchar_nospace(byte)
}

fn is_bchar_nospace(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"'()+_,-./:=?".contains(&byte)
}

/// A validated RFC 2046 boundary token.
///
/// Construction via [`Boundary::new`] enforces the grammar, so holding a
/// `Boundary` means the token is safe to splice into delimiter lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary(String);

impl Boundary {
    /// Maximum token length permitted by RFC 2046.
    pub const MAX_LEN: usize = 70;

    /// Length of tokens produced by [`BoundaryGenerator`].
    pub const GENERATED_LEN: usize = Self::MAX_LEN;

    /// Validates `token` against the boundary grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidBoundary`] if the token is empty,
    /// longer than 70 characters, ends with a space, or contains a
    /// character outside the `bchars` alphabet.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(ProtocolError::InvalidBoundary {
                reason: "token is empty".to_owned(),
            });
        }
        if let Some(bad) = token.chars().find(|&c| !u8::try_from(c).is_ok_and(is_bchar)) {
            return Err(ProtocolError::InvalidBoundary {
                reason: format!("character {bad:?} is outside the bchars alphabet"),
            });
        }
        // All bchars are ASCII, so byte length equals character count.
        if token.len() > Self::MAX_LEN {
            return Err(ProtocolError::InvalidBoundary {
                reason: format!("{} characters exceeds the maximum of {}", token.len(), Self::MAX_LEN),
            });
        }
        if token.ends_with(' ') {
            return Err(ProtocolError::InvalidBoundary {
                reason: "token ends with a space".to_owned(),
            });
        }
        Ok(Self(token))
    }

    /// The token text, without the leading `--` of a delimiter line.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Boundary {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Boundary> for String {
    fn from(boundary: Boundary) -> Self {
        boundary.0
    }
}

/// Mints fresh boundary tokens.
///
/// The generator is generic over its RNG so deterministic tests can seed
/// it; production code uses [`BoundaryGenerator::new`] which draws from
/// the thread-local RNG.
#[derive(Debug, Clone)]
pub struct BoundaryGenerator<R = ThreadRng> {
    rng: R,
}

impl BoundaryGenerator<ThreadRng> {
    /// Creates a generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for BoundaryGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BoundaryGenerator<R> {
    /// Creates a generator backed by `rng`.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Produces a maximum-length boundary token.
    ///
    /// Every position is drawn uniformly from the boundary alphabet; the
    /// final position is drawn from the no-space subset so the token
    /// never ends with a space.
    pub fn generate(&mut self) -> Boundary {
        let mut token = String::with_capacity(Boundary::GENERATED_LEN);
        for _ in 0..Boundary::GENERATED_LEN - 1 {
            token.push(char::from(BCHARS[self.rng.gen_range(0..BCHARS.len())]));
        }
        token.push(char::from(
            BCHARS_NOSPACE[self.rng.gen_range(0..BCHARS_NOSPACE.len())],
        ));
        Boundary(token)
    }
}
