use serde::{Deserialize, Serialize};

use crate::domain::{UserId, UserRecord};

/// A user as returned by the remote listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl From<RemoteUser> for UserRecord {
    fn from(value: RemoteUser) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            username: None,
            email: value.email,
            image: value.avatar,
        }
    }
}

/// One page of the remote listing. `total` and `total_pages` are zero when
/// the source does not report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub data: Vec<RemoteUser>,
}

impl UsersPage {
    pub fn into_records(self) -> Vec<UserRecord> {
        self.data.into_iter().map(UserRecord::from).collect()
    }
}
