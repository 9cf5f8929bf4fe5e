//! Message discipline for the nav-data protocol.
//!
//! Pure envelope logic, completely decoupled from the transport. The
//! HTTP (or other) transport layer interacts with this crate only
//! through header values and body strings; nothing here performs I/O,
//! so the same code serves production endpoints and deterministic
//! tests.
//!
//! # Components
//!
//! - [`envelope`]: Pairing an affordance list with content and moving
//!   the pair through one `multipart/nav-data` container

pub mod envelope;

pub use envelope::{Envelope, EnvelopeError, WireMessage};
