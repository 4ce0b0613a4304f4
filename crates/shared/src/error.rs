use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    RemoteFetch,
    NotFound,
    StaleEdit,
}

/// Non-blocking message surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("page size must be a positive integer")]
    InvalidPageSize,
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(u32),
    #[error("no user with id {0} in the roster")]
    UserNotFound(UserId),
    #[error("edit form is open for user {seeded}, not {requested}")]
    EditTargetMismatch { requested: UserId, seeded: UserId },
}

impl RosterError {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::UserNotFound(_) => Some(Notice::new(NoticeKind::NotFound, self.to_string())),
            Self::EditTargetMismatch { .. } => {
                Some(Notice::new(NoticeKind::StaleEdit, self.to_string()))
            }
            Self::InvalidPageSize | Self::InvalidPage(_) => None,
        }
    }
}
