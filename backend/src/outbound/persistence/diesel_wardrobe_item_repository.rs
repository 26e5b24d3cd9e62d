//! PostgreSQL-backed [`WardrobeItemRepository`] using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{WardrobeItemRepository, WardrobeItemRepositoryError};
use crate::domain::{
    BlobAddress, Category, UserId, WardrobeItem, WardrobeItemDetails, WardrobeItemId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewWardrobeItemRow, WardrobeItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::wardrobe_items;

/// Diesel implementation of the wardrobe item repository port.
#[derive(Clone)]
pub struct DieselWardrobeItemRepository {
    pool: DbPool,
}

impl DieselWardrobeItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WardrobeItemRepositoryError {
    map_basic_pool_error(error, WardrobeItemRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> WardrobeItemRepositoryError {
    map_basic_diesel_error(
        error,
        WardrobeItemRepositoryError::query,
        WardrobeItemRepositoryError::connection,
    )
}

fn corrupt(column: &str, error: impl std::fmt::Display) -> WardrobeItemRepositoryError {
    WardrobeItemRepositoryError::query(format!("stored {column} invalid: {error}"))
}

fn row_to_item(row: WardrobeItemRow) -> Result<WardrobeItem, WardrobeItemRepositoryError> {
    Ok(WardrobeItem {
        id: WardrobeItemId::from_uuid(row.id),
        user_id: UserId::new(&row.user_id).map_err(|err| corrupt("user_id", err))?,
        image_url: BlobAddress::parse(&row.image_url).map_err(|err| corrupt("image_url", err))?,
        category: Category::new(&row.category).map_err(|err| corrupt("category", err))?,
        details: WardrobeItemDetails {
            subcategory: row.subcategory,
            color: row.color,
            fit: row.fit,
            brand: row.brand,
            size: row.size,
        },
        created_at: row.created_at,
    })
}

fn new_row(item: &WardrobeItem) -> NewWardrobeItemRow<'_> {
    let details = &item.details;
    NewWardrobeItemRow {
        id: *item.id.as_uuid(),
        user_id: item.user_id.as_ref(),
        image_url: item.image_url.to_string(),
        category: item.category.as_ref(),
        subcategory: details.subcategory.as_deref(),
        color: details.color.as_deref(),
        fit: details.fit.as_deref(),
        brand: details.brand.as_deref(),
        size: details.size.as_deref(),
        created_at: item.created_at,
    }
}

#[async_trait]
impl WardrobeItemRepository for DieselWardrobeItemRepository {
    async fn insert(&self, item: &WardrobeItem) -> Result<(), WardrobeItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(wardrobe_items::table)
            .values(new_row(item))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<WardrobeItem>, WardrobeItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<WardrobeItemRow> = wardrobe_items::table
            .filter(wardrobe_items::user_id.eq(user_id.as_ref()))
            .order((wardrobe_items::created_at.desc(), wardrobe_items::id.desc()))
            .select(WardrobeItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn delete(
        &self,
        id: &WardrobeItemId,
    ) -> Result<Option<WardrobeItem>, WardrobeItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<WardrobeItemRow> =
            diesel::delete(wardrobe_items::table.filter(wardrobe_items::id.eq(id.as_uuid())))
                .returning(WardrobeItemRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(image_url: &str) -> WardrobeItemRow {
        WardrobeItemRow {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            image_url: image_url.into(),
            category: "shirts".into(),
            subcategory: None,
            color: Some("blue".into()),
            fit: None,
            brand: None,
            size: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_round_trips_through_the_insert_shape() {
        let item = row_to_item(row("/uploads/abc-shirt.jpg")).expect("valid row");
        let insert = new_row(&item);
        assert_eq!(insert.image_url, "/uploads/abc-shirt.jpg");
        assert_eq!(insert.color, Some("blue"));
        assert_eq!(insert.id, *item.id.as_uuid());
    }

    #[rstest]
    #[case::outside_uploads("/etc/passwd")]
    #[case::traversal("/uploads/../secret")]
    fn rows_with_unsafe_image_urls_are_rejected(#[case] image_url: &str) {
        assert!(matches!(
            row_to_item(row(image_url)),
            Err(WardrobeItemRepositoryError::Query { .. })
        ));
    }
}
