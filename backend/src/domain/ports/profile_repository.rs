//! Driven port for profile persistence.

use async_trait::async_trait;

use crate::domain::{Profile, ProfileUpsert, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
    }
}

/// Port for profile storage keyed by user identifier.
///
/// # Upsert semantics
///
/// [`ProfileRepository::upsert`] must be atomic with respect to the user
/// identifier: concurrent upserts for one identifier leave exactly one
/// profile behind. Attributes absent from the write keep their stored value,
/// `updated_at` takes the write's timestamp, and `created_at` is only set
/// when the profile is first created.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create or update the profile and return the stored result.
    async fn upsert(&self, write: &ProfileUpsert) -> Result<Profile, ProfileRepositoryError>;

    /// Fetch the profile for `user_id`, if any.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}
