//! Pairing an affordance list with content in one container.
//!
//! An [`Envelope`] is the in-memory form of a protocol message: the
//! affordances a client may follow next, plus one piece of content with
//! its headers. [`Envelope::wrap`] serializes the pair into a
//! `multipart/nav-data` container under a freshly minted boundary and
//! hands back the header value and body for the transport to send.
//! [`Envelope::unwrap`] reverses the trip from a received header value
//! and body.
//!
//! Unwrapping is best-effort in the same spirit as the decoder
//! underneath: surplus parts are ignored with a debug log, a missing
//! affordance part yields an empty list, and a missing content part
//! yields an empty body. The hard failures are a header value without a
//! boundary parameter and the codec's own caller errors.

use navdata_proto::errors::ProtocolError;
use navdata_proto::media;
use navdata_proto::multipart::MultipartCodec;
use navdata_proto::naval::{self, Affordance};
use navdata_proto::part::{BodyPart, Content, HeaderMap};
use rand::Rng;
use thiserror::Error;

/// Errors raised while wrapping or unwrapping an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EnvelopeError {
    /// The `content-type` value of a received message names no boundary,
    /// so there is no way to tokenize the body.
    #[error("content-type value carries no boundary parameter: {value:?}")]
    MissingBoundary {
        /// The offending header value.
        value: String,
    },

    /// The container codec rejected the call.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// A serialized message, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    /// Value for the transport's `content-type` header, boundary
    /// parameter included.
    pub content_type: String,
    /// The container text for the transport's body.
    pub body: String,
}

/// One protocol message in memory: affordances plus content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    /// What the client may do next.
    pub affordances: Vec<Affordance>,
    /// Headers describing the content, `content-type` above all.
    pub content_headers: HeaderMap,
    /// The content itself.
    pub content_body: String,
}

impl Envelope {
    /// Creates an envelope from its three pieces.
    pub fn new(
        affordances: Vec<Affordance>,
        content_headers: HeaderMap,
        content_body: impl Into<String>,
    ) -> Self {
        Self {
            affordances,
            content_headers,
            content_body: content_body.into(),
        }
    }

    /// Serializes this envelope into a container under a fresh boundary.
    ///
    /// The container always holds two parts: the encoded affordance list
    /// under `application/naval+json`, then the content part carrying
    /// this envelope's headers and body. A content part without a
    /// declared `content-type` goes onto the wire with the protocol
    /// default, `text/plain; charset=US-ASCII`; the envelope itself is
    /// not modified.
    ///
    /// # Errors
    ///
    /// Propagates [`ProtocolError`] from the container encoder.
    pub fn wrap<R: Rng>(
        &self,
        codec: &mut MultipartCodec<R>,
    ) -> Result<WireMessage, EnvelopeError> {
        let naval_part = BodyPart::text(naval::encode(&self.affordances))
            .with_header(media::CONTENT_TYPE, media::APPLICATION_NAVAL_JSON);

        let mut content_part = BodyPart {
            headers: self.content_headers.clone(),
            content: Content::Text(self.content_body.clone()),
        };
        if !content_part.headers.contains(media::CONTENT_TYPE) {
            content_part
                .headers
                .insert(media::CONTENT_TYPE, media::DEFAULT_CONTENT_TYPE);
        }

        let (boundary, body) = codec.encode_generated(&[naval_part, content_part])?;
        Ok(WireMessage {
            content_type: media::content_type_with_boundary(&boundary),
            body,
        })
    }

    /// Rebuilds an envelope from a received header value and body.
    ///
    /// The boundary is taken from the `boundary` parameter of
    /// `content_type`. The first `application/naval+json` part becomes
    /// the affordance list, decoded leniently; the first other part
    /// becomes the content, with `content-type` defaulted when absent.
    /// Surplus parts are ignored. A container with neither kind of part
    /// unwraps to an empty envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MissingBoundary`] when `content_type`
    /// names no boundary, and propagates [`ProtocolError`] from the
    /// container decoder.
    pub fn unwrap<R: Rng>(
        content_type: &str,
        body: &str,
        codec: &MultipartCodec<R>,
    ) -> Result<Self, EnvelopeError> {
        let Some(token) = media::extract_boundary(content_type) else {
            return Err(EnvelopeError::MissingBoundary {
                value: content_type.to_owned(),
            });
        };
        if !media::is_nav_data(content_type) {
            tracing::debug!(content_type, "container advertised under an unexpected media type");
        }

        let parts = codec.decode(body, &token)?;
        let mut affordances: Option<Vec<Affordance>> = None;
        let mut content: Option<BodyPart> = None;
        for part in parts {
            let is_naval = part
                .headers
                .get(media::CONTENT_TYPE)
                .is_some_and(media::is_naval);
            if is_naval {
                if affordances.is_none() {
                    affordances = Some(
                        part.content
                            .as_text()
                            .map(naval::decode)
                            .unwrap_or_default(),
                    );
                } else {
                    tracing::debug!("ignoring surplus affordance part");
                }
            } else if content.is_none() {
                content = Some(part);
            } else {
                tracing::debug!("ignoring surplus content part");
            }
        }

        let (content_headers, content_body) = match content {
            Some(part) => {
                let mut headers = part.headers;
                if !headers.contains(media::CONTENT_TYPE) {
                    headers.insert(media::CONTENT_TYPE, media::DEFAULT_CONTENT_TYPE);
                }
                let body = match part.content {
                    Content::Text(text) => text,
                    Content::Absent => String::new(),
                    Content::Nested(_) => {
                        tracing::debug!("content part holds a nested container, treating as empty");
                        String::new()
                    }
                };
                (headers, body)
            }
            None => (HeaderMap::new(), String::new()),
        };

        Ok(Self {
            affordances: affordances.unwrap_or_default(),
            content_headers,
            content_body,
        })
    }
}
