//! SeaORM entity models for the voicehub datastore.

pub mod prelude;

pub mod user;
