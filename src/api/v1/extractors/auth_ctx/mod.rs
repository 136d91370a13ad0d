/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the caller identity (AuthCtx) placed by the access middleware to handlers
 * - axum wiring lives in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
