//! Wire format for the nav-data hypermedia protocol.
//!
//! A transport message is a `multipart/nav-data` container: a
//! boundary-delimited sequence of parts, each a short header block plus
//! an optional body. One part usually carries an
//! `application/naval+json` affordance list telling the client what it
//! can do next; the remaining parts carry ordinary content. Containers
//! nest by placing a further container in a part body, with the nested
//! boundary declared as a quoted `boundary` parameter on that part's
//! `content-type` header.
//!
//! The container profile is a restricted RFC 2046: CRLF line endings,
//! `name:value` header fields without the colon-space, and a body
//! separated from the headers by one blank line. Keeping the profile
//! small lets the decoder be a single character-level scanner instead of
//! a full MIME stack.
//!
//! # Robustness
//!
//! Input is treated as untrusted. The decoder never rejects damaged
//! data; truncated or garbled containers decode to whatever parts can be
//! recovered, and unparseable affordance documents decode to an empty
//! list. The only hard failures are caller mistakes (malformed boundary
//! tokens, unencodable part trees) and the nesting budget, which caps
//! recursion on hostile input.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod boundary;
pub mod errors;
pub mod media;
pub mod multipart;
pub mod naval;
pub mod part;

pub use boundary::{Boundary, BoundaryGenerator};
pub use errors::{ProtocolError, Result};
pub use multipart::{CodecConfig, MultipartCodec};
pub use naval::{Affordance, FormControl};
pub use part::{BodyPart, Content, HeaderMap};
