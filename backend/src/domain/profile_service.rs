//! Profile domain service.
//!
//! Implements the profile driving ports over a [`ProfileRepository`]. Upsert
//! atomicity is delegated to the repository, which performs the find-or-create
//! as a single keyed operation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError, UpsertProfileRequest,
};
use crate::domain::{Error, Profile, ProfileUpsert, UserId};

/// Profile service implementing [`ProfileCommand`] and [`ProfileQuery`].
#[derive(Clone)]
pub struct ProfileService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ProfileService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> ProfileService<R>
where
    R: ProfileRepository,
{
    fn map_repository_error(error: ProfileRepositoryError) -> Error {
        match error {
            ProfileRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("profile repository unavailable: {message}"))
            }
            ProfileRepositoryError::Query { message } => {
                Error::internal(format!("profile repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> ProfileCommand for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn upsert(&self, request: UpsertProfileRequest) -> Result<Profile, Error> {
        let write = ProfileUpsert {
            user_id: request.user_id,
            attributes: request.attributes.normalised(),
            at: self.clock.utc(),
        };
        let profile = self
            .repository
            .upsert(&write)
            .await
            .map_err(Self::map_repository_error)?;
        tracing::debug!(user_id = %profile.user_id, "profile upserted");
        Ok(profile)
    }
}

#[async_trait]
impl<R> ProfileQuery for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn get(&self, user_id: &UserId) -> Result<Profile, Error> {
        self.repository
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("profile not found")
                    .with_details(json!({ "userId": user_id.as_ref() }))
            })
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
