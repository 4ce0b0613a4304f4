use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One roster entry as held by the in-memory collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Never populated for remote-origin records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub image: String,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Field values submitted by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
}

impl UserDraft {
    pub fn into_record(self, id: UserId, image: impl Into<String>) -> UserRecord {
        UserRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            image: image.into(),
        }
    }
}

impl From<&UserRecord> for UserDraft {
    fn from(record: &UserRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
        }
    }
}
