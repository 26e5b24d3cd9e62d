//! Blob naming and addressing.
//!
//! Uploaded images are stored flat in one directory and served from
//! `/uploads/<name>`. The types here guarantee that a name is a single plain
//! path component so no address can reach outside that directory.

use std::fmt;

use serde::{Deserialize, Serialize};

/// URL prefix under which stored blobs are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

const FALLBACK_STEM: &str = "upload";

/// Validation errors for blob names and addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobAddressError {
    #[error("blob name must not be empty")]
    EmptyName,
    #[error("blob name must be a single plain path component")]
    InvalidName,
    #[error("blob address must start with /uploads/")]
    MissingPrefix,
}

/// File name of a stored blob inside the uploads directory.
///
/// # Examples
/// ```
/// use wardrobe::domain::BlobName;
///
/// assert!(BlobName::new("1a2b-shirt.jpg").is_ok());
/// assert!(BlobName::new("../secret").is_err());
/// assert!(BlobName::new(".hidden").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobName(String);

impl BlobName {
    pub fn new(name: impl Into<String>) -> Result<Self, BlobAddressError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BlobAddressError::EmptyName);
        }
        let unsafe_char = |c: char| c == '/' || c == '\\' || c == '\0' || c.is_control();
        if name.starts_with('.') || name.chars().any(unsafe_char) {
            return Err(BlobAddressError::InvalidName);
        }
        Ok(Self(name))
    }

    /// Build a fresh collision-resistant name from a client-supplied file name.
    ///
    /// The result is `<token>-<sanitised name>`. Only the final path segment
    /// of `original` is kept and characters outside `[A-Za-z0-9._-]` become
    /// `_`.
    ///
    /// # Examples
    /// ```
    /// use wardrobe::domain::BlobName;
    ///
    /// let name = BlobName::generate("abc123", "C:\\photos\\my shirt.JPG");
    /// assert_eq!(name.as_ref(), "abc123-my_shirt.JPG");
    /// ```
    pub fn generate(token: &str, original: &str) -> Self {
        let base = original
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        let sanitised: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = sanitised.trim_start_matches('.');
        let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
        Self(format!("{token}-{stem}"))
    }
}

impl AsRef<str> for BlobName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Public address of a stored blob, for example `/uploads/1a2b-shirt.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlobAddress(BlobName);

impl BlobAddress {
    /// Parse an address of the form `/uploads/<name>`.
    pub fn parse(raw: &str) -> Result<Self, BlobAddressError> {
        let name = raw
            .strip_prefix(UPLOADS_PREFIX)
            .ok_or(BlobAddressError::MissingPrefix)?;
        BlobName::new(name).map(Self)
    }

    pub fn name(&self) -> &BlobName {
        &self.0
    }
}

impl From<BlobName> for BlobAddress {
    fn from(value: BlobName) -> Self {
        Self(value)
    }
}

impl fmt::Display for BlobAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{UPLOADS_PREFIX}{}", self.0)
    }
}

impl From<BlobAddress> for String {
    fn from(value: BlobAddress) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BlobAddress {
    type Error = BlobAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Validation errors for [`UploadedImage`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadedImageError {
    #[error("image payload must not be empty")]
    EmptyPayload,
}

/// Binary image received from a client, not yet persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadedImageError> {
        if bytes.is_empty() {
            return Err(UploadedImageError::EmptyPayload);
        }
        Ok(Self {
            file_name: file_name.into(),
            bytes,
        })
    }

    /// Original client-side file name, possibly empty.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Blob content read back for serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("shirt.jpg", "tok-shirt.jpg")]
    #[case::spaces("my shirt.png", "tok-my_shirt.png")]
    #[case::unix_path("/tmp/a/b.gif", "tok-b.gif")]
    #[case::windows_path("C:\\x\\y.jpeg", "tok-y.jpeg")]
    #[case::unicode("chemise été.jpg", "tok-chemise__t_.jpg")]
    #[case::empty("", "tok-upload")]
    #[case::dots_only("..", "tok-upload")]
    #[case::dotfile(".env", "tok-env")]
    fn generate_sanitises_original_name(#[case] original: &str, #[case] expected: &str) {
        assert_eq!(BlobName::generate("tok", original).as_ref(), expected);
    }

    #[rstest]
    #[case::traversal("../etc/passwd")]
    #[case::nested("a/b.jpg")]
    #[case::backslash("a\\b.jpg")]
    #[case::dotdot("..")]
    #[case::hidden(".secret")]
    fn name_rejects_unsafe_components(#[case] raw: &str) {
        assert_eq!(BlobName::new(raw), Err(BlobAddressError::InvalidName));
    }

    #[rstest]
    fn address_round_trips_through_string() {
        let address = BlobAddress::parse("/uploads/abc-shirt.jpg").expect("valid address");
        assert_eq!(address.name().as_ref(), "abc-shirt.jpg");
        assert_eq!(String::from(address), "/uploads/abc-shirt.jpg");
    }

    #[rstest]
    #[case::no_prefix("abc.jpg", BlobAddressError::MissingPrefix)]
    #[case::other_prefix("/static/abc.jpg", BlobAddressError::MissingPrefix)]
    #[case::empty_name("/uploads/", BlobAddressError::EmptyName)]
    #[case::escaping("/uploads/../x", BlobAddressError::InvalidName)]
    fn address_rejects_malformed_values(#[case] raw: &str, #[case] expected: BlobAddressError) {
        assert_eq!(BlobAddress::parse(raw), Err(expected));
    }

    #[rstest]
    fn uploaded_image_rejects_empty_payload() {
        let result = UploadedImage::new("shirt.jpg", Vec::new());
        assert_eq!(result, Err(UploadedImageError::EmptyPayload));
    }
}
