//! URI component codec for the nav-data protocol suite.
//!
//! Splits URI references into their RFC 3986 components and recomposes
//! components back into a string. The transport layer uses this to resolve
//! and rewrite affordance link targets; the codec itself performs no
//! resolution and no validation beyond the split itself.
//!
//! # Absent vs. empty
//!
//! A component whose separator never appeared in the source is *absent*
//! (`None`); a component whose separator appeared with nothing after it is
//! *present but empty* (`Some("")`). `decode` keeps the two apart so that
//! `http://host/p`, `http://host/p?` and `http://host/p?#` all map to
//! distinct values. `encode` deliberately collapses them: an absent or
//! empty component is omitted together with its separator, matching the
//! original wire behavior.
//!
//! # Example
//!
//! ```
//! use navdata_uri::{decode, encode};
//!
//! let c = decode("http://www.google.com:80/search?query=text#result");
//! assert_eq!(c.protocol(), "http");
//! assert_eq!(c.host(), "www.google.com:80");
//! assert_eq!(c.origin(), "http://www.google.com:80");
//! assert_eq!(encode(&c), "http://www.google.com:80/search?query=text#result");
//! ```

pub mod codec;
pub mod components;

pub use codec::{decode, encode};
pub use components::UriComponents;
