//! Diesel Record Store adapters against a live PostgreSQL database.
//!
//! Set `WARDROBE_TEST_DATABASE_URL` to run these tests; they are skipped
//! otherwise. Every test writes under a fresh user id so runs do not collide.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use futures_util::future::join_all;
use rstest::rstest;
use uuid::Uuid;
use wardrobe::domain::ports::{ProfileRepository, WardrobeItemRepository};
use wardrobe::domain::{
    BlobAddress, Category, ProfileAttributes, ProfileUpsert, UserId, WardrobeItem,
    WardrobeItemDetails, WardrobeItemId,
};
use wardrobe::outbound::persistence::{
    DbPool, DieselProfileRepository, DieselWardrobeItemRepository, PoolConfig,
    run_pending_migrations,
};

const DATABASE_URL_ENV: &str = "WARDROBE_TEST_DATABASE_URL";

async fn pool() -> Option<DbPool> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP: {DATABASE_URL_ENV} is not set");
        return None;
    };
    run_pending_migrations(&url).await.expect("apply migrations");
    let config = PoolConfig::new(url)
        .with_max_size(2)
        .with_connection_timeout(Duration::from_secs(5));
    Some(DbPool::new(config).await.expect("connect to test database"))
}

fn fresh_user() -> UserId {
    UserId::new(format!("test-{}", Uuid::new_v4())).expect("user id")
}

// PostgreSQL keeps microseconds.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn item(user_id: &UserId, category: &str, created_at: DateTime<Utc>) -> WardrobeItem {
    let id = WardrobeItemId::random();
    WardrobeItem {
        id,
        user_id: user_id.clone(),
        image_url: BlobAddress::parse(&format!("/uploads/{}-item.jpg", id.as_uuid().simple()))
            .expect("address"),
        category: Category::new(category).expect("category"),
        details: WardrobeItemDetails {
            color: Some("blue".to_owned()),
            ..WardrobeItemDetails::default()
        },
        created_at,
    }
}

#[rstest]
#[tokio::test]
async fn profile_upsert_preserves_omitted_columns() {
    let Some(pool) = pool().await else { return };
    let repo = DieselProfileRepository::new(pool);
    let user_id = fresh_user();
    let first_at = now();

    let created = repo
        .upsert(&ProfileUpsert {
            user_id: user_id.clone(),
            attributes: ProfileAttributes {
                skin_tone: Some("fair".to_owned()),
                waist: Some("80cm".to_owned()),
                ..ProfileAttributes::default()
            },
            at: first_at,
        })
        .await
        .expect("first upsert");
    let updated = repo
        .upsert(&ProfileUpsert {
            user_id: user_id.clone(),
            attributes: ProfileAttributes {
                waist: Some("78cm".to_owned()),
                ..ProfileAttributes::default()
            },
            at: first_at + TimeDelta::seconds(5),
        })
        .await
        .expect("second upsert");

    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_at, first_at + TimeDelta::seconds(5));
    assert_eq!(updated.attributes.skin_tone.as_deref(), Some("fair"));
    assert_eq!(updated.attributes.waist.as_deref(), Some("78cm"));

    let fetched = repo.find_by_user_id(&user_id).await.expect("find");
    assert_eq!(fetched, Some(updated));
}

#[rstest]
#[tokio::test]
async fn racing_profile_upserts_leave_one_row() {
    let Some(pool) = pool().await else { return };
    let repo = DieselProfileRepository::new(pool);
    let user_id = fresh_user();
    let at = now();

    let writes: Vec<ProfileUpsert> = (0_i64..8)
        .map(|n| ProfileUpsert {
            user_id: user_id.clone(),
            attributes: ProfileAttributes {
                height: Some(format!("{}cm", 160 + n)),
                ..ProfileAttributes::default()
            },
            at: at + TimeDelta::milliseconds(n),
        })
        .collect();
    let results = join_all(writes.iter().map(|write| repo.upsert(write))).await;

    let stored: Vec<_> = results
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("every upsert succeeds");
    let first_created = stored.first().map(|profile| profile.created_at);
    assert!(stored.iter().all(|profile| Some(profile.created_at) == first_created));
    let fetched = repo
        .find_by_user_id(&user_id)
        .await
        .expect("find")
        .expect("one profile row");
    assert_eq!(fetched.user_id, user_id);
}

#[rstest]
#[tokio::test]
async fn missing_profile_is_none() {
    let Some(pool) = pool().await else { return };
    let repo = DieselProfileRepository::new(pool);

    let found = repo.find_by_user_id(&fresh_user()).await.expect("find");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn items_list_newest_first_and_delete_returns_the_row() {
    let Some(pool) = pool().await else { return };
    let repo = DieselWardrobeItemRepository::new(pool);
    let user_id = fresh_user();
    let start = now();
    let items: Vec<WardrobeItem> = ["a", "b", "c"]
        .iter()
        .zip(0_i64..)
        .map(|(category, offset)| item(&user_id, category, start + TimeDelta::seconds(offset)))
        .collect();
    for stored in &items {
        repo.insert(stored).await.expect("insert");
    }

    let listed = repo.list_by_user(&user_id).await.expect("list");
    let categories: Vec<&str> = listed.iter().map(|item| item.category.as_ref()).collect();
    assert_eq!(categories, ["c", "b", "a"]);

    let target = items.first().expect("first item");
    let removed = repo.delete(&target.id).await.expect("delete");
    assert_eq!(removed.as_ref(), Some(target));
    assert_eq!(repo.delete(&target.id).await.expect("second delete"), None);
    assert_eq!(repo.list_by_user(&user_id).await.expect("list").len(), 2);
}
