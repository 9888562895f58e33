//! Server-side domain models.
//!
//! Domain models are what services and repositories exchange. Gateway payloads and
//! database entities are converted into them at the layer boundaries.

pub mod user;
pub mod voice;
