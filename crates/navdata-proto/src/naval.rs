//! NavAL, the JSON sublanguage for affordance lists.
//!
//! A NavAL document is a JSON array of affordance descriptors. Each
//! descriptor tells a client one thing it can do next: the link
//! relation, the method to invoke, the target URI, and optionally a
//! human-readable title, extra request headers, and a form-control list
//! describing the request body to construct.
//!
//! The codec is total in both directions. Encoding cannot fail for
//! these types, and a document that does not parse as an affordance
//! array is logged and decoded as the empty list. Feeds routinely carry
//! payloads from foreign producers, and one bad document must not take
//! down the surrounding container decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single navigation affordance.
///
/// `rel`, `method`, and `uri` are required by the sublanguage; documents
/// missing any of them fail to decode. Unknown keys are ignored so newer
/// producers can extend descriptors without breaking older consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affordance {
    /// Human-readable label for the affordance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link relation, e.g. `self`, `next`, `search`.
    pub rel: String,
    /// Method to invoke on the target.
    pub method: String,
    /// Target URI, possibly relative.
    pub uri: String,
    /// Request headers to send when following the affordance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
    /// Form controls describing the request body to construct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<FormControl>>,
}

impl Affordance {
    /// Creates an affordance with the three required fields.
    pub fn new(rel: impl Into<String>, method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: None,
            rel: rel.into(),
            method: method.into(),
            uri: uri.into(),
            headers: None,
            body: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Appends a form control to the body description.
    #[must_use]
    pub fn with_control(mut self, control: FormControl) -> Self {
        self.body.get_or_insert_with(Vec::new).push(control);
        self
    }
}

/// One input field of an affordance body description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormControl {
    /// Field name submitted with the request.
    pub name: String,
    /// Human-readable label for the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Pre-filled value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Control type hint, serialized as `type`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub control_type: Option<String>,
}

impl FormControl {
    /// Creates a control with the given field name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            value: None,
            control_type: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the pre-filled value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the control type hint.
    #[must_use]
    pub fn with_type(mut self, control_type: impl Into<String>) -> Self {
        self.control_type = Some(control_type.into());
        self
    }
}

/// Serializes an affordance list as a NavAL document.
///
/// Optional fields that are unset are omitted from the output, so a
/// decode/encode pass over a minimal document is byte-stable.
pub fn encode(affordances: &[Affordance]) -> String {
    match serde_json::to_string(affordances) {
        Ok(json) => json,
        Err(error) => {
            // Not reachable with string-keyed maps, but the codec stays total.
            tracing::warn!(%error, "naval encode failed, emitting an empty document");
            "[]".to_owned()
        }
    }
}

/// Parses a NavAL document into an affordance list.
///
/// Anything that is not a JSON array of well-formed descriptors decodes
/// as the empty list; the failure is logged, never raised.
pub fn decode(input: &str) -> Vec<Affordance> {
    match serde_json::from_str(input) {
        Ok(affordances) => affordances,
        Err(error) => {
            tracing::warn!(%error, "discarding malformed naval document");
            Vec::new()
        }
    }
}
