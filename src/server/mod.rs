//! Discord bot and dashboard backend.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Bot** (`bot/`) - Gateway event handlers and the serenity-backed platform gateway
//! - **Controller Layer** (`controller/`) - HTTP handlers for the dashboard
//! - **Service Layer** (`service/`) - Temporary rooms, registration and dashboard stats
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared dashboard state (DB and the bot's cache)
//! - **Startup** (`startup`) - Tracing, database initialization and shutdown signal
//! - **Router** (`router`) - Axum route configuration

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
