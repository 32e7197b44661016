//! biorisk-core
//!
//! Pure domain types shared by the scoring engine, the report exporter and
//! the application shell. No scoring logic lives here.

pub mod error;
pub mod models;
