/*
 * Responsibility
 * - public surface of v1 (routes(), extractors for the middleware)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
