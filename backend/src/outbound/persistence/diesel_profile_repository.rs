//! PostgreSQL-backed [`ProfileRepository`] using Diesel.
//!
//! Upserts are a single `INSERT … ON CONFLICT (user_id) DO UPDATE …
//! RETURNING` statement, so PostgreSQL serialises concurrent writes for the
//! same identifier and exactly one row survives.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileAttributes, ProfileUpsert, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProfileRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

diesel::define_sql_function! {
    /// SQL `COALESCE` over two nullable text expressions.
    fn coalesce(value: Nullable<Text>, fallback: Nullable<Text>) -> Nullable<Text>;
}

/// Diesel implementation of the profile repository port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let user_id = UserId::new(&row.user_id)
        .map_err(|err| ProfileRepositoryError::query(format!("stored user id invalid: {err}")))?;
    Ok(Profile {
        user_id,
        attributes: ProfileAttributes {
            skin_tone: row.skin_tone,
            height: row.height,
            weight: row.weight,
            chest: row.chest,
            waist: row.waist,
            shoulders: row.shoulders,
            style_preference: row.style_preference,
            favorite_colors: row.favorite_colors,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn new_row(write: &ProfileUpsert) -> NewProfileRow<'_> {
    let attributes = &write.attributes;
    NewProfileRow {
        user_id: write.user_id.as_ref(),
        skin_tone: attributes.skin_tone.as_deref(),
        height: attributes.height.as_deref(),
        weight: attributes.weight.as_deref(),
        chest: attributes.chest.as_deref(),
        waist: attributes.waist.as_deref(),
        shoulders: attributes.shoulders.as_deref(),
        style_preference: attributes.style_preference.as_deref(),
        favorite_colors: attributes.favorite_colors.as_deref(),
        created_at: write.at,
        updated_at: write.at,
    }
}

/// Keep the stored value of `$column` when the incoming row leaves it null.
macro_rules! keep_when_absent {
    ($column:ident) => {
        profiles::$column.eq(coalesce(excluded(profiles::$column), profiles::$column))
    };
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn upsert(&self, write: &ProfileUpsert) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ProfileRow = diesel::insert_into(profiles::table)
            .values(new_row(write))
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                keep_when_absent!(skin_tone),
                keep_when_absent!(height),
                keep_when_absent!(weight),
                keep_when_absent!(chest),
                keep_when_absent!(waist),
                keep_when_absent!(shoulders),
                keep_when_absent!(style_preference),
                keep_when_absent!(favorite_colors),
                profiles::updated_at.eq(excluded(profiles::updated_at)),
            ))
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_profile(row)
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::user_id.eq(user_id.as_ref()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::debug_query;
    use diesel::pg::Pg;
    use rstest::rstest;

    #[rstest]
    fn upsert_sql_preserves_omitted_columns() {
        let write = ProfileUpsert {
            user_id: UserId::new("u1").expect("valid user id"),
            attributes: ProfileAttributes {
                skin_tone: Some("fair".into()),
                ..ProfileAttributes::default()
            },
            at: Utc::now(),
        };
        let query = diesel::insert_into(profiles::table)
            .values(new_row(&write))
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                keep_when_absent!(skin_tone),
                profiles::updated_at.eq(excluded(profiles::updated_at)),
            ));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains("ON CONFLICT"));
        assert!(sql.contains("DO UPDATE"));
        assert!(sql.contains("coalesce(excluded.\"skin_tone\""));
        assert!(!sql.contains("\"created_at\" = "));
    }

    #[rstest]
    fn row_conversion_rejects_blank_user_id() {
        let now = Utc::now();
        let row = ProfileRow {
            user_id: " ".into(),
            skin_tone: None,
            height: None,
            weight: None,
            chest: None,
            waist: None,
            shoulders: None,
            style_preference: None,
            favorite_colors: None,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            row_to_profile(row),
            Err(ProfileRepositoryError::Query { .. })
        ));
    }
}
