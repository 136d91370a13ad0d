/*
 * Responsibility
 * - the "authenticated caller" type handlers and the role gate see
 * - the access middleware verifies the token and inserts it into request extensions
 *
 * Notes
 * - lives for exactly one request; nothing here is persisted
 * - roles are deliberately absent: the role gate reads the current value from the store
 */

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
