//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// One style profile per free-text user identifier.
    profiles (user_id) {
        user_id -> Text,
        skin_tone -> Nullable<Text>,
        height -> Nullable<Text>,
        weight -> Nullable<Text>,
        chest -> Nullable<Text>,
        waist -> Nullable<Text>,
        shoulders -> Nullable<Text>,
        style_preference -> Nullable<Text>,
        favorite_colors -> Nullable<Text>,
        /// Set on first insert, never updated.
        created_at -> Timestamptz,
        /// Refreshed by every upsert.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clothing entries. `user_id` is a weak reference to `profiles`.
    wardrobe_items (id) {
        id -> Uuid,
        user_id -> Text,
        /// Public blob address, `/uploads/<name>`.
        image_url -> Text,
        category -> Text,
        subcategory -> Nullable<Text>,
        color -> Nullable<Text>,
        fit -> Nullable<Text>,
        brand -> Nullable<Text>,
        size -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}
