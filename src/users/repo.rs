use async_trait::async_trait;

use crate::users::repo_types::{InsertOutcome, User};

/// Credential store keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// All users in store order.
    async fn list(&self) -> anyhow::Result<Vec<User>>;

    /// Write `user` unless a record with the same email exists, as one atomic step.
    async fn insert_if_absent(&self, user: User) -> anyhow::Result<InsertOutcome>;
}
