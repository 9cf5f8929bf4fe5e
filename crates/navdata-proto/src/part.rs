//! Body parts and their header mappings.

use indexmap::IndexMap;

use crate::media;

/// Ordered, case-insensitive header mapping.
///
/// Field names are canonically lower-cased on insertion and looked up
/// case-insensitively. Insertion order is preserved, so decoding a
/// container and re-encoding it keeps untouched parts byte-stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: IndexMap<String, String>,
}

impl HeaderMap {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, lower-casing the name.
    ///
    /// Returns the previous value if the field was already present; the
    /// field keeps its original position in that case.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.fields
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    /// Looks up a field, ignoring the case of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    /// Returns true if the field is present, ignoring the case of `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Removes a field, preserving the order of the remaining fields.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.shift_remove(name.to_ascii_lowercase().as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Payload of a body part.
///
/// `Text("")` and `Absent` serialize identically (headers only, no
/// blank-line separator), so either decodes back as `Text("")`. `Absent`
/// is the resting state of a freshly constructed header-only part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    /// No payload.
    #[default]
    Absent,
    /// Flat text payload.
    Text(String),
    /// Parts to be serialized as a nested multipart container.
    Nested(Vec<BodyPart>),
}

impl Content {
    /// Returns true for [`Content::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The text payload, if this is flat text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The nested part list, if this is a nested container.
    pub fn as_nested(&self) -> Option<&[BodyPart]> {
        match self {
            Self::Nested(parts) => Some(parts),
            _ => None,
        }
    }
}

/// One part of a multipart container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyPart {
    /// Header fields, in wire order.
    pub headers: HeaderMap,
    /// The part payload.
    pub content: Content,
}

impl BodyPart {
    /// A part with no headers and no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A header-less part wrapping flat text.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            headers: HeaderMap::new(),
            content: Content::Text(body.into()),
        }
    }

    /// A part carrying nested parts under the given media type.
    ///
    /// No boundary parameter is attached here; the encoder mints a fresh
    /// boundary when the container is serialized and appends it to the
    /// `content-type` on the wire only.
    pub fn nested(content_type: impl Into<String>, parts: Vec<BodyPart>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(media::CONTENT_TYPE, content_type);
        Self {
            headers,
            content: Content::Nested(parts),
        }
    }

    /// Adds a header field, consuming and returning the part.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}
