//! Data transfer objects returned by the HTTP surface.

pub mod api;
pub mod dashboard;
