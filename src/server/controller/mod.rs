//! HTTP request handlers.
//!
//! The only surface is the read-only dashboard.

pub mod dashboard;
