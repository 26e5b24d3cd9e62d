//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{profiles, wardrobe_items};

/// Row read from `profiles`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub user_id: String,
    pub skin_tone: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub chest: Option<String>,
    pub waist: Option<String>,
    pub shoulders: Option<String>,
    pub style_preference: Option<String>,
    pub favorite_colors: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable profile used as the upsert payload.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub user_id: &'a str,
    pub skin_tone: Option<&'a str>,
    pub height: Option<&'a str>,
    pub weight: Option<&'a str>,
    pub chest: Option<&'a str>,
    pub waist: Option<&'a str>,
    pub shoulders: Option<&'a str>,
    pub style_preference: Option<&'a str>,
    pub favorite_colors: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `wardrobe_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wardrobe_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WardrobeItemRow {
    pub id: Uuid,
    pub user_id: String,
    pub image_url: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub color: Option<String>,
    pub fit: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable wardrobe item.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wardrobe_items)]
pub(crate) struct NewWardrobeItemRow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub image_url: String,
    pub category: &'a str,
    pub subcategory: Option<&'a str>,
    pub color: Option<&'a str>,
    pub fit: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub size: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}
