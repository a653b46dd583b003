//! Shared types for the marketplace backend
//!
//! Error types, response envelopes and listing models used by the
//! server crate and by anything that talks to it.

pub mod error;
pub mod models;
