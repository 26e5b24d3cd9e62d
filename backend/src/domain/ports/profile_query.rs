//! Driving port for profile lookups.

use async_trait::async_trait;

use crate::domain::{Error, Profile, UserId};

/// Use-case port for reading a profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the profile, failing with `not_found` when none exists.
    async fn get(&self, user_id: &UserId) -> Result<Profile, Error>;
}
