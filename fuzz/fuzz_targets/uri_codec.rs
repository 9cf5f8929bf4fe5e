//! URI component codec fuzz target.
//!
//! Splitting is total, so neither direction may panic. Recomposition
//! only ever drops empty components and their separators, so the
//! re-encoded string never grows, and repeated trips must terminate.

#![no_main]

use libfuzzer_sys::fuzz_target;
use navdata_uri::{decode, encode};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let components = decode(&text);
    let recomposed = encode(&components);
    assert!(recomposed.len() <= text.len());

    // Each trip shrinks or stabilizes, so this loop is bounded by the
    // input length.
    let mut current = recomposed;
    loop {
        let next = encode(&decode(&current));
        assert!(next.len() <= current.len());
        if next == current {
            break;
        }
        current = next;
    }
});
