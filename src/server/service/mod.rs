//! Service layer for business logic and orchestration.
//!
//! Services sit between the entry points (bot event handlers, HTTP controllers) and
//! the data layer. They work with domain models rather than DTOs or entity models.
//!
//! - [`voice`] - Join-to-Create rooms: registry, lifecycle and control panel
//! - [`user`] - Registration of guild members
//! - [`dashboard`] - Aggregate counts for the status page

pub mod dashboard;
pub mod user;
pub mod voice;
