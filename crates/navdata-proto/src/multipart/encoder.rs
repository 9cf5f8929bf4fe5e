//! Serializing part lists onto the wire.

use rand::Rng;

use super::{CRLF, CodecConfig};
use crate::boundary::{Boundary, BoundaryGenerator};
use crate::errors::{ProtocolError, Result};
use crate::media;
use crate::part::{BodyPart, Content};

/// Serializes `parts` as one container delimited by `boundary`.
///
/// `depth` counts containers, the outermost being 1. Nested containers
/// recurse with a freshly minted boundary per container.
pub(super) fn encode_container<R: Rng>(
    parts: &[BodyPart],
    boundary: &Boundary,
    generator: &mut BoundaryGenerator<R>,
    config: &CodecConfig,
    depth: usize,
) -> Result<String> {
    if depth > config.max_depth {
        return Err(ProtocolError::NestingTooDeep {
            depth,
            max_depth: config.max_depth,
        });
    }
    let mut wire = String::new();
    wire.push_str("--");
    wire.push_str(boundary.as_str());
    wire.push_str(CRLF);
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            wire.push_str(CRLF);
            wire.push_str("--");
            wire.push_str(boundary.as_str());
            wire.push_str(CRLF);
        }
        encode_part(&mut wire, part, generator, config, depth)?;
    }
    wire.push_str(CRLF);
    wire.push_str("--");
    wire.push_str(boundary.as_str());
    wire.push_str("--");
    Ok(wire)
}

/// Appends one part to `wire`.
///
/// Header fields are written as `name:value` lines in insertion order.
/// The blank-line separator and body are only written when there is a
/// non-empty body to follow, so header-only parts and parts with an
/// empty text body serialize identically.
fn encode_part<R: Rng>(
    wire: &mut String,
    part: &BodyPart,
    generator: &mut BoundaryGenerator<R>,
    config: &CodecConfig,
    depth: usize,
) -> Result<()> {
    match &part.content {
        Content::Nested(children) => {
            let declared = part
                .headers
                .get(media::CONTENT_TYPE)
                .ok_or(ProtocolError::NestedContentWithoutType)?;
            if media::extract_boundary(declared).is_some() {
                return Err(ProtocolError::BoundaryParameterPresent);
            }
            let nested = generator.generate();
            // The parameter exists on the wire only; the in-memory part
            // keeps its declared content-type untouched.
            write_headers(wire, part, Some(&nested));
            wire.push_str(CRLF);
            let container = encode_container(children, &nested, generator, config, depth + 1)?;
            wire.push_str(&container);
        }
        Content::Text(text) if !text.is_empty() => {
            write_headers(wire, part, None);
            wire.push_str(CRLF);
            wire.push_str(text);
        }
        Content::Text(_) | Content::Absent => {
            write_headers(wire, part, None);
        }
    }
    Ok(())
}

fn write_headers(wire: &mut String, part: &BodyPart, nested_boundary: Option<&Boundary>) {
    for (name, value) in part.headers.iter() {
        wire.push_str(name);
        wire.push(':');
        wire.push_str(value);
        if name == media::CONTENT_TYPE
            && let Some(boundary) = nested_boundary
        {
            wire.push_str("; boundary=\"");
            wire.push_str(boundary.as_str());
            wire.push('"');
        }
        wire.push_str(CRLF);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::multipart::MultipartCodec;
    use crate::part::HeaderMap;

    fn codec() -> MultipartCodec<ChaCha20Rng> {
        MultipartCodec::from_rng(ChaCha20Rng::seed_from_u64(7))
    }

    #[test]
    fn serializes_an_empty_part_list() {
        let wire = codec().encode(&[], "B").unwrap();
        assert_eq!(wire, "--B\r\n\r\n--B--");
    }

    #[test]
    fn serializes_headers_and_body_with_blank_line_between() {
        let parts = vec![
            BodyPart::empty(),
            BodyPart::text("something").with_header("content-type", "text/plain"),
        ];
        let wire = codec().encode(&parts, "B").unwrap();
        assert_eq!(
            wire,
            "--B\r\n\r\n--B\r\ncontent-type:text/plain\r\n\r\nsomething\r\n--B--"
        );
    }

    #[test]
    fn empty_text_body_serializes_like_absent_content() {
        let with_empty_text = vec![BodyPart::text("").with_header("x-marker", "1")];
        let with_absent = vec![BodyPart::empty().with_header("x-marker", "1")];
        let mut codec = codec();
        assert_eq!(
            codec.encode(&with_empty_text, "B").unwrap(),
            codec.encode(&with_absent, "B").unwrap()
        );
        assert_eq!(
            codec.encode(&with_absent, "B").unwrap(),
            "--B\r\nx-marker:1\r\n\r\n--B--"
        );
    }

    #[test]
    fn headerless_text_part_keeps_the_blank_line() {
        let wire = codec().encode(&[BodyPart::text("hi")], "B").unwrap();
        assert_eq!(wire, "--B\r\n\r\nhi\r\n--B--");
    }

    #[test]
    fn header_order_is_wire_order() {
        let part = BodyPart::empty()
            .with_header("Z-Second", "2")
            .with_header("a-first", "1");
        let wire = codec().encode(&[part], "B").unwrap();
        assert_eq!(wire, "--B\r\nz-second:2\r\na-first:1\r\n\r\n--B--");
    }

    #[test]
    fn nested_content_mints_a_quoted_boundary_parameter() {
        let parts = vec![BodyPart::nested(
            media::MULTIPART_NAV_DATA,
            vec![BodyPart::text("inner")],
        )];
        let wire = codec().encode(&parts, "outer").unwrap();

        let header_line = wire.lines().nth(1).unwrap();
        let value = header_line.strip_prefix("content-type:").unwrap();
        let nested = media::extract_boundary(value).unwrap();
        assert!(Boundary::new(nested.as_str()).is_ok());
        assert_eq!(nested.len(), Boundary::GENERATED_LEN);
        assert!(wire.contains(&format!("\r\n--{nested}\r\n")));
        assert!(wire.ends_with("\r\n--outer--"));
    }

    #[test]
    fn nested_encoding_leaves_the_part_untouched() {
        let parts = vec![BodyPart::nested(
            media::MULTIPART_NAV_DATA,
            vec![BodyPart::text("inner")],
        )];
        codec().encode(&parts, "outer").unwrap();
        assert_eq!(
            parts[0].headers.get("content-type"),
            Some(media::MULTIPART_NAV_DATA)
        );
    }

    #[test]
    fn nested_content_without_content_type_is_rejected() {
        let part = BodyPart {
            headers: HeaderMap::new(),
            content: Content::Nested(vec![BodyPart::text("inner")]),
        };
        assert_eq!(
            codec().encode(&[part], "B"),
            Err(ProtocolError::NestedContentWithoutType)
        );
    }

    #[test]
    fn preexisting_boundary_parameter_is_rejected() {
        let part = BodyPart::nested(
            "multipart/nav-data; boundary=\"stale\"",
            vec![BodyPart::text("inner")],
        );
        assert_eq!(
            codec().encode(&[part], "B"),
            Err(ProtocolError::BoundaryParameterPresent)
        );
    }

    #[test]
    fn boundary_parameter_on_flat_content_is_fine() {
        // The conflict checks only apply to parts that actually nest.
        let part = BodyPart::text("verbatim")
            .with_header("content-type", "multipart/nav-data; boundary=\"stale\"");
        assert!(codec().encode(&[part], "B").is_ok());
    }

    #[test]
    fn invalid_caller_boundary_is_rejected() {
        assert!(matches!(
            codec().encode(&[], "bad;token"),
            Err(ProtocolError::InvalidBoundary { .. })
        ));
        assert!(matches!(
            codec().encode(&[], ""),
            Err(ProtocolError::InvalidBoundary { .. })
        ));
    }

    #[test]
    fn nesting_budget_is_enforced() {
        let mut deep = BodyPart::text("leaf");
        for _ in 0..3 {
            deep = BodyPart::nested(media::MULTIPART_NAV_DATA, vec![deep]);
        }
        let mut codec = codec().with_config(CodecConfig { max_depth: 3 });
        let error = codec.encode(&[deep.clone()], "B").unwrap_err();
        assert_eq!(
            error,
            ProtocolError::NestingTooDeep {
                depth: 4,
                max_depth: 3
            }
        );

        // One level shallower fits the budget exactly.
        let Content::Nested(children) = deep.content else {
            unreachable!()
        };
        assert!(codec.encode(&children, "B").is_ok());
    }

    #[test]
    fn seeded_codecs_produce_identical_wire() {
        let parts = vec![BodyPart::nested(
            media::MULTIPART_NAV_DATA,
            vec![BodyPart::text("inner")],
        )];
        let a = codec().encode(&parts, "B").unwrap();
        let b = codec().encode(&parts, "B").unwrap();
        assert_eq!(a, b);
    }
}
