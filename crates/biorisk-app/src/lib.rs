//! biorisk-app library root.
//!
//! The application shell around the scoring engine: form parsing, session
//! state and the on-disk config. Exposed as a library so integration tests
//! can drive a session without going through the binary.

pub mod config;
pub mod form;
pub mod session;
