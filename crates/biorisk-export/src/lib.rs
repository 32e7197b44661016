//! biorisk-export
//!
//! Report payload and text rendering for a computed risk result. Page
//! layout (PDF, fonts) is left to the caller.

pub mod error;
pub mod render;
pub mod report;
pub mod write;
