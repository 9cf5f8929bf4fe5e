//! End-to-end vectors for composing and reading protocol messages.

use navdata_proto::media;
use navdata_proto::multipart::MultipartCodec;
use navdata_proto::naval::{self, Affordance, FormControl};
use navdata_proto::part::{BodyPart, Content};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn two_part_message_matches_the_documented_wire() {
    let parts = vec![
        BodyPart::empty(),
        BodyPart::text("something").with_header("content-type", "text/plain"),
    ];
    let mut codec = MultipartCodec::new();
    let wire = codec.encode(&parts, "B").unwrap();
    assert_eq!(
        wire,
        "--B\r\n\r\n--B\r\ncontent-type:text/plain\r\n\r\nsomething\r\n--B--"
    );

    let decoded = codec.decode(&wire, "B").unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].content, Content::Text(String::new()));
    assert_eq!(decoded[1].content, Content::Text("something".to_owned()));

    // The empty-text part serializes exactly like the absent one did.
    assert_eq!(codec.encode(&decoded, "B").unwrap(), wire);
}

#[test]
fn empty_container_wire_stabilizes_after_one_round_trip() {
    let mut codec = MultipartCodec::new();
    let wire = codec.encode(&[], "B").unwrap();
    assert_eq!(wire, "--B\r\n\r\n--B--");

    // An empty container is indistinguishable from one empty part, and
    // that single empty part re-encodes to the same bytes.
    let decoded = codec.decode(&wire, "B").unwrap();
    assert_eq!(decoded, vec![BodyPart::text("")]);
    assert_eq!(codec.encode(&decoded, "B").unwrap(), wire);
}

#[test]
fn three_level_nesting_round_trips() {
    let leaf = BodyPart::text("deepest").with_header("x-depth", "3");
    let mid = BodyPart::nested(
        media::MULTIPART_NAV_DATA,
        vec![leaf, BodyPart::text("sibling")],
    );
    let top = BodyPart::nested(media::MULTIPART_NAV_DATA, vec![mid]);

    let mut codec = MultipartCodec::from_rng(ChaCha20Rng::seed_from_u64(3));
    let wire = codec.encode(std::slice::from_ref(&top), "outermost").unwrap();
    let decoded = codec.decode(&wire, "outermost").unwrap();
    assert_eq!(decoded, vec![top]);

    // Each nested container got its own minted boundary.
    let minted: Vec<String> = wire
        .lines()
        .filter(|line| line.starts_with("content-type:"))
        .filter_map(media::extract_boundary)
        .collect();
    assert_eq!(minted.len(), 2);
    assert_ne!(minted[0], minted[1]);
}

#[test]
fn affordance_feed_message_round_trips() {
    let affordances = vec![
        Affordance::new("self", "GET", "/orders/7"),
        Affordance::new("search", "POST", "/orders/search")
            .with_title("Search orders")
            .with_control(FormControl::new("q").with_type("text")),
    ];
    let message = vec![
        BodyPart::text(naval::encode(&affordances))
            .with_header("content-type", media::APPLICATION_NAVAL_JSON),
        BodyPart::text("Order 7: pending").with_header("content-type", "text/plain"),
    ];

    let mut codec = MultipartCodec::new();
    let (boundary, wire) = codec.encode_generated(&message).unwrap();
    let advertised = media::content_type_with_boundary(&boundary);

    // The receiving side sees only the advertised content-type and the
    // wire text.
    let token = media::extract_boundary(&advertised).unwrap();
    let parts = codec.decode(&wire, &token).unwrap();
    assert_eq!(parts.len(), 2);

    let naval_part = parts
        .iter()
        .find(|part| {
            part.headers
                .get("content-type")
                .is_some_and(media::is_naval)
        })
        .unwrap();
    let recovered = naval::decode(naval_part.content.as_text().unwrap());
    assert_eq!(recovered, affordances);

    let content_part = parts
        .iter()
        .find(|part| {
            part.headers
                .get("content-type")
                .is_some_and(|value| !media::is_naval(value))
        })
        .unwrap();
    assert_eq!(content_part.content, Content::Text("Order 7: pending".to_owned()));
}

#[test]
fn mismatched_boundary_decodes_to_nothing() {
    let mut codec = MultipartCodec::new();
    let wire = codec
        .encode(&[BodyPart::text("hello")], "right-token")
        .unwrap();
    assert_eq!(codec.decode(&wire, "wrong-token").unwrap(), vec![]);
}
