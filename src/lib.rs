//! Book catalogue API guarded by bearer-token verification and bitmask role checks.
//!
//! The binary in `main.rs` only calls [`app::run`]; everything else is exposed
//! here so the HTTP pipeline can be driven from `tests/`.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
