use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::error::RosterError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://randomuser.me/api/portraits/thumb/lego/1.jpg";

/// Which layer owns pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PagingMode {
    /// Each page change fetches that page from the remote source and the
    /// whole roster (fetched page plus local records) is shown unwindowed.
    #[default]
    Remote,
    /// The whole listing is fetched once and paged locally.
    Local,
}

/// What a successful refresh does with local-only mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshPolicy {
    /// Re-apply local creates, edits and deletes on top of the fetched records.
    #[default]
    KeepLocal,
    /// Overwrite the roster with the fetched records and forget local changes.
    Replace,
}

impl FromStr for PagingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            other => Err(format!("unknown paging mode '{other}' (expected remote|local)")),
        }
    }
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep-local" | "keep_local" => Ok(Self::KeepLocal),
            "replace" => Ok(Self::Replace),
            other => Err(format!(
                "unknown refresh policy '{other}' (expected keep-local|replace)"
            )),
        }
    }
}

impl fmt::Display for PagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Local => "local",
        })
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::KeepLocal => "keep-local",
            Self::Replace => "replace",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub page_size: NonZeroU32,
    pub paging: PagingMode,
    pub refresh: RefreshPolicy,
    pub placeholder_image: String,
}

impl RosterConfig {
    pub fn new(page_size: u32) -> Result<Self, RosterError> {
        let page_size = NonZeroU32::new(page_size).ok_or(RosterError::InvalidPageSize)?;
        Ok(Self {
            page_size,
            paging: PagingMode::default(),
            refresh: RefreshPolicy::default(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        })
    }

    pub fn with_paging(mut self, paging: PagingMode) -> Self {
        self.paging = paging;
        self
    }

    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_placeholder_image(mut self, image: impl Into<String>) -> Self {
        self.placeholder_image = image.into();
        self
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            paging: PagingMode::default(),
            refresh: RefreshPolicy::default(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}
