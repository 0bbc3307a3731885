use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Request body for `PUT /users`.
#[derive(Debug, Deserialize)]
pub struct UpsertUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub password: String,
}

/// Write acknowledgement returned when a new user is stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WriteResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: String, // email of the new record
}

impl WriteResult {
    pub fn upserted(email: &str) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: email.to_string(),
        }
    }
}

/// Either the record that already existed or the result of the new write.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UpsertResponse {
    Existing(User),
    Written(WriteResult),
}
