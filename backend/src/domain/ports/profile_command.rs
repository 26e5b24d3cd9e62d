//! Driving port for profile writes.

use async_trait::async_trait;

use crate::domain::{Error, Profile, ProfileAttributes, UserId};

/// Request to create or update a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertProfileRequest {
    pub user_id: UserId,
    pub attributes: ProfileAttributes,
}

/// Use-case port for profile upserts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Create the profile on first use, otherwise overwrite the supplied
    /// attributes and refresh `updated_at`.
    async fn upsert(&self, request: UpsertProfileRequest) -> Result<Profile, Error>;
}
