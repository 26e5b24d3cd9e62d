//! Wardrobe item data model, listing filters, and category aggregation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::text::normalise_optional;
use super::{BlobAddress, UserId};

/// Server-generated identifier of a wardrobe item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WardrobeItemId(Uuid);

impl WardrobeItemId {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a client-supplied identifier.
    ///
    /// Returns `None` for anything that is not a UUID, since no stored item
    /// can carry such an identifier.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for WardrobeItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("category must not be empty")]
    Empty,
}

/// Clothing category such as `shirts` or `shoes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub fn new(value: impl AsRef<str>) -> Result<Self, CategoryValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Optional descriptive attributes of a wardrobe item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItemDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "t-shirt")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "blue")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl WardrobeItemDetails {
    /// Trim every attribute and drop the ones left empty.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            subcategory: normalise_optional(self.subcategory),
            color: normalise_optional(self.color),
            fit: normalise_optional(self.fit),
            brand: normalise_optional(self.brand),
            size: normalise_optional(self.size),
        }
    }
}

/// One clothing entry owned by a user.
///
/// ## Invariants
/// - `image_url` addresses a blob that existed when the item was created.
/// - The item is immutable after creation; it is only ever deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    #[schema(value_type = String, format = Uuid)]
    pub id: WardrobeItemId,
    #[schema(value_type = String, example = "u1")]
    pub user_id: UserId,
    #[schema(value_type = String, example = "/uploads/0f8e2c1d4b6a4e0f9d3c2b1a09876543-shirt.jpg")]
    pub image_url: BlobAddress,
    #[schema(value_type = String, example = "shirts")]
    pub category: Category,
    #[serde(flatten)]
    pub details: WardrobeItemDetails,
    pub created_at: DateTime<Utc>,
}

/// Server-side listing filter.
///
/// `category` matches case-insensitively and exactly. `query` is a
/// case-insensitive substring searched in category, subcategory, color, and
/// brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardrobeFilter {
    category: Option<String>,
    query: Option<String>,
}

impl WardrobeFilter {
    /// Build a filter; blank values impose no constraint.
    ///
    /// # Examples
    /// ```
    /// use wardrobe::domain::WardrobeFilter;
    ///
    /// assert!(WardrobeFilter::new(Some(" ".into()), None).is_empty());
    /// assert!(!WardrobeFilter::new(Some("Shirts".into()), None).is_empty());
    /// ```
    #[must_use]
    pub fn new(category: Option<String>, query: Option<String>) -> Self {
        Self {
            category: normalise_optional(category).map(|value| value.to_lowercase()),
            query: normalise_optional(query).map(|value| value.to_lowercase()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.query.is_none()
    }

    pub fn matches(&self, item: &WardrobeItem) -> bool {
        let category = item.category.as_ref().to_lowercase();
        if self
            .category
            .as_ref()
            .is_some_and(|expected| *expected != category)
        {
            return false;
        }
        let Some(query) = &self.query else {
            return true;
        };
        let details = &item.details;
        std::iter::once(Some(category.as_str()))
            .chain([
                details.subcategory.as_deref(),
                details.color.as_deref(),
                details.brand.as_deref(),
            ])
            .flatten()
            .any(|field| field.to_lowercase().contains(query.as_str()))
    }

    /// Keep the matching items, preserving their order.
    #[must_use]
    pub fn apply(&self, items: Vec<WardrobeItem>) -> Vec<WardrobeItem> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Number of items in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    #[schema(value_type = String, example = "shirts")]
    pub category: Category,
    pub count: usize,
}

/// Per-category breakdown of a user's wardrobe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

impl CategorySummary {
    /// Aggregate items by category, largest first and then by name.
    ///
    /// Categories are grouped by exact value.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a WardrobeItem>) -> Self {
        let mut counts: BTreeMap<&Category, usize> = BTreeMap::new();
        let mut total = 0;
        for item in items {
            *counts.entry(&item.category).or_default() += 1;
            total += 1;
        }
        let mut categories: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.clone(),
                count,
            })
            .collect();
        // BTreeMap iteration is name-ordered, so a stable sort by count keeps
        // ties alphabetical.
        categories.sort_by(|a, b| b.count.cmp(&a.count));
        Self { total, categories }
    }
}
