//! Affordance document fuzz target.
//!
//! `naval::decode` is total: arbitrary input must come back as a list,
//! never a panic. Whatever it accepts must survive a serialize round
//! trip unchanged.

#![no_main]

use libfuzzer_sys::fuzz_target;
use navdata_proto::naval;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let affordances = naval::decode(&text);
    if !affordances.is_empty() {
        let encoded = naval::encode(&affordances);
        assert_eq!(naval::decode(&encoded), affordances);
    }
});
