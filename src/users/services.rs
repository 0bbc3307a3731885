use time::OffsetDateTime;
use tracing::{debug, info};

use crate::{
    auth::password::hash_password_off_thread,
    mail::{Email, Notifier},
    users::{
        dto::{UpsertResponse, UpsertUserRequest, WriteResult},
        repo::UserStore,
        repo_types::{InsertOutcome, Role, User},
    },
};

fn now_epoch_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// First-time registration. An existing email short-circuits with the stored
/// record: no hash, no write, no mail. Name or password changes for an existing
/// user are ignored.
pub async fn upsert_user(
    users: &dyn UserStore,
    notifier: &Notifier,
    hash_cost: u32,
    req: UpsertUserRequest,
) -> anyhow::Result<UpsertResponse> {
    if let Some(existing) = users.find_by_email(&req.email).await? {
        debug!(email = %existing.email, "user exists, returning stored record");
        return Ok(UpsertResponse::Existing(existing));
    }

    let password_hash = hash_password_off_thread(req.password, hash_cost).await?;
    let candidate = User {
        email: req.email,
        name: req.name,
        password_hash,
        role: Role::User,
        created_at_epoch_millis: now_epoch_millis(),
    };

    match users.insert_if_absent(candidate).await? {
        InsertOutcome::Created(user) => {
            info!(email = %user.email, "user registered");
            notifier.dispatch(Email::welcome(&user.email));
            Ok(UpsertResponse::Written(WriteResult::upserted(&user.email)))
        }
        InsertOutcome::Existing(user) => {
            debug!(email = %user.email, "concurrent registration won, returning stored record");
            Ok(UpsertResponse::Existing(user))
        }
    }
}
