//! Style profile data model.
//!
//! A profile is keyed by a client-supplied free-text user identifier. There is
//! at most one profile per identifier; writes go through an upsert that keeps
//! previously stored attributes when a later payload omits them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::text::normalise_optional;

/// Validation errors for [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    #[error("user id must not be empty")]
    Empty,
}

/// Free-text owner identifier shared by profiles and wardrobe items.
///
/// Surrounding whitespace is stripped on construction.
///
/// # Examples
/// ```
/// use wardrobe::domain::UserId;
///
/// let id = UserId::new("  u1 ").expect("valid id");
/// assert_eq!(id.as_ref(), "u1");
/// assert!(UserId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Optional style and measurement attributes of a profile.
///
/// Every attribute is free text. Absent attributes are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "fair")]
    pub skin_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "170cm")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulders: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "minimal")]
    pub style_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_colors: Option<String>,
}

impl ProfileAttributes {
    /// Trim every attribute and drop the ones left empty.
    ///
    /// # Examples
    /// ```
    /// use wardrobe::domain::ProfileAttributes;
    ///
    /// let attributes = ProfileAttributes {
    ///     skin_tone: Some(" fair ".into()),
    ///     height: Some("   ".into()),
    ///     ..ProfileAttributes::default()
    /// }
    /// .normalised();
    /// assert_eq!(attributes.skin_tone.as_deref(), Some("fair"));
    /// assert!(attributes.height.is_none());
    /// ```
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            skin_tone: normalise_optional(self.skin_tone),
            height: normalise_optional(self.height),
            weight: normalise_optional(self.weight),
            chest: normalise_optional(self.chest),
            waist: normalise_optional(self.waist),
            shoulders: normalise_optional(self.shoulders),
            style_preference: normalise_optional(self.style_preference),
            favorite_colors: normalise_optional(self.favorite_colors),
        }
    }

    /// Overlay `update` on top of `self`, keeping stored values for any
    /// attribute the update leaves out.
    #[must_use]
    pub fn merged_with(self, update: Self) -> Self {
        Self {
            skin_tone: update.skin_tone.or(self.skin_tone),
            height: update.height.or(self.height),
            weight: update.weight.or(self.weight),
            chest: update.chest.or(self.chest),
            waist: update.waist.or(self.waist),
            shoulders: update.shoulders.or(self.shoulders),
            style_preference: update.style_preference.or(self.style_preference),
            favorite_colors: update.favorite_colors.or(self.favorite_colors),
        }
    }
}

/// A user's style profile.
///
/// ## Invariants
/// - `created_at` is set once and never changes.
/// - `updated_at` is refreshed by every upsert and is never earlier than
///   `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[schema(value_type = String, example = "u1")]
    pub user_id: UserId,
    #[serde(flatten)]
    pub attributes: ProfileAttributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A write against the profile keyed by `user_id`.
///
/// `at` becomes `updated_at`, and `created_at` too when no profile exists yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpsert {
    pub user_id: UserId,
    pub attributes: ProfileAttributes,
    pub at: DateTime<Utc>,
}

impl ProfileUpsert {
    /// Apply this write to an existing profile, or create one.
    #[must_use]
    pub fn apply(self, existing: Option<Profile>) -> Profile {
        match existing {
            Some(profile) => Profile {
                user_id: profile.user_id,
                attributes: profile.attributes.merged_with(self.attributes),
                created_at: profile.created_at,
                updated_at: self.at,
            },
            None => Profile {
                user_id: self.user_id,
                attributes: self.attributes,
                created_at: self.at,
                updated_at: self.at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn first_write() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn upsert(attributes: ProfileAttributes, at: DateTime<Utc>) -> ProfileUpsert {
        ProfileUpsert {
            user_id: UserId::new("u1").expect("valid id"),
            attributes,
            at,
        }
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("  \t ")]
    fn user_id_rejects_blank_values(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(UserIdValidationError::Empty));
    }

    #[rstest]
    fn user_id_deserialisation_validates() {
        let result = serde_json::from_value::<UserId>(json!("  "));
        assert!(result.is_err());
    }

    #[rstest]
    fn first_upsert_creates_with_matching_timestamps(first_write: DateTime<Utc>) {
        let attributes = ProfileAttributes {
            skin_tone: Some("fair".into()),
            ..ProfileAttributes::default()
        };
        let profile = upsert(attributes.clone(), first_write).apply(None);

        assert_eq!(profile.attributes, attributes);
        assert_eq!(profile.created_at, first_write);
        assert_eq!(profile.updated_at, first_write);
    }

    #[rstest]
    fn later_upsert_keeps_omitted_fields(first_write: DateTime<Utc>) {
        let existing = upsert(
            ProfileAttributes {
                skin_tone: Some("fair".into()),
                height: Some("170cm".into()),
                ..ProfileAttributes::default()
            },
            first_write,
        )
        .apply(None);

        let later = first_write + chrono::TimeDelta::minutes(5);
        let updated = upsert(
            ProfileAttributes {
                height: Some("172cm".into()),
                ..ProfileAttributes::default()
            },
            later,
        )
        .apply(Some(existing));

        assert_eq!(updated.attributes.skin_tone.as_deref(), Some("fair"));
        assert_eq!(updated.attributes.height.as_deref(), Some("172cm"));
        assert_eq!(updated.created_at, first_write);
        assert_eq!(updated.updated_at, later);
    }

    #[rstest]
    fn profile_serialises_flat_camel_case(first_write: DateTime<Utc>) {
        let profile = upsert(
            ProfileAttributes {
                style_preference: Some("minimal".into()),
                ..ProfileAttributes::default()
            },
            first_write,
        )
        .apply(None);

        let value = serde_json::to_value(&profile).expect("serialise profile");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["stylePreference"], "minimal");
        assert!(value.get("skinTone").is_none());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }
}
