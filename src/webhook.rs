//! Typed Messenger webhook payloads and the entry flattener.
//!
//! The platform delivers events as a `{object: "page", entry: [...]}` envelope
//! whose entries each carry a `messaging` array of individual event records.
//! [`event`] models the full payload catalogue as serde types;
//! [`flatten`](flatten::flatten) walks the envelope and produces the flat
//! ordered list of messaging events.

pub mod event;
pub mod flatten;

pub use event::*;
pub use flatten::*;
