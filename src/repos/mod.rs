/*
 * Responsibility
 * - SQLx access per table (free functions over &PgPool)
 * - RoleStore: the single read the role gate depends on
 */
pub mod book_repo;
pub mod error;
pub mod role_store;
pub mod user_repo;

pub use role_store::{PgRoleStore, RoleStore};
