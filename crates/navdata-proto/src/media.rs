//! Media types and `content-type` helpers.
//!
//! The protocol speaks two media types of its own: `multipart/nav-data`
//! for containers and `application/naval+json` for affordance lists.
//! Everything else is opaque content that rides along under whatever
//! type the producer declared.

use crate::boundary::{self, Boundary};

/// Canonical header field name for media types.
pub const CONTENT_TYPE: &str = "content-type";

/// Media type of a multipart container.
pub const MULTIPART_NAV_DATA: &str = "multipart/nav-data";

/// Media type of a serialized affordance list.
pub const APPLICATION_NAVAL_JSON: &str = "application/naval+json";

/// Media type assumed for content parts that do not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=US-ASCII";

/// Formats a container `content-type` value carrying `boundary`.
///
/// The token is always quoted. Boundaries may contain spaces and other
/// characters that would otherwise end the parameter.
pub fn content_type_with_boundary(boundary: &Boundary) -> String {
    format!("{MULTIPART_NAV_DATA}; boundary=\"{boundary}\"")
}

/// The media type of a `content-type` value, without parameters.
pub fn essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or("").trim()
}

/// Returns true if the value names the affordance-list media type.
pub fn is_naval(content_type: &str) -> bool {
    essence(content_type).eq_ignore_ascii_case(APPLICATION_NAVAL_JSON)
}

/// Returns true if the value names the container media type.
pub fn is_nav_data(content_type: &str) -> bool {
    essence(content_type).eq_ignore_ascii_case(MULTIPART_NAV_DATA)
}

/// Extracts the boundary token from a `content-type` value.
///
/// Accepts both `boundary="token"` and the unquoted form. When several
/// `boundary` parameters are present the last one wins, matching the
/// decoder. The returned token is exactly the captured run of boundary
/// alphabet characters; callers validate it before use.
pub fn extract_boundary(header_value: &str) -> Option<String> {
    let bytes = header_value.as_bytes();
    let mut found = None;
    let mut search = 0;
    while let Some(offset) = bytes[search..].iter().position(|&b| b == b';') {
        let semicolon = search + offset;
        if let Some((token, next)) = scan_boundary_parameter(bytes, semicolon) {
            found = Some(token);
            search = next;
        } else {
            search = semicolon + 1;
        }
    }
    found
}

/// Attempts to parse `; boundary=token` starting at a `;` in `bytes`.
///
/// Leading spaces and tabs after the semicolon are permitted, and the
/// token may be double-quoted. On a match, returns the token and the
/// index just past it (past the closing quote, if any). Returns `None`
/// without consuming anything if the parameter is not `boundary=` or the
/// token is empty.
pub(crate) fn scan_boundary_parameter(bytes: &[u8], semicolon: usize) -> Option<(String, usize)> {
    const NEEDLE: &[u8] = b"boundary=";
    let mut pos = semicolon + 1;
    while bytes.get(pos).is_some_and(|&b| b == b' ' || b == b'\t') {
        pos += 1;
    }
    if pos >= bytes.len() || !bytes[pos..].starts_with(NEEDLE) {
        return None;
    }
    pos += NEEDLE.len();
    let quoted = bytes.get(pos) == Some(&b'"');
    if quoted {
        pos += 1;
    }
    let start = pos;
    while bytes.get(pos).is_some_and(|&b| boundary::is_bchar(b)) {
        pos += 1;
    }
    if pos == start {
        return None;
    }
    let token = String::from_utf8_lossy(&bytes[start..pos]).into_owned();
    if quoted && bytes.get(pos) == Some(&b'"') {
        pos += 1;
    }
    Some((token, pos))
}
