//! Optional profile fields shown alongside a user.

use serde::{Deserialize, Serialize};

/// Avatar used when a user does not supply one.
pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";

/// Header image used when a user does not supply one.
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";

/// Presentation fields of a user.
///
/// Blank inputs are normalised: image URLs fall back to their defaults and
/// blank bio or location become `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    image_url: String,
    header_image_url: String,
    bio: Option<String>,
    location: Option<String>,
}

impl Profile {
    /// Sets the avatar URL, or restores the default when blank.
    #[must_use]
    pub fn with_image_url(mut self, url: Option<&str>) -> Self {
        self.image_url = non_blank(url).unwrap_or_else(|| DEFAULT_IMAGE_URL.to_owned());
        self
    }

    /// Sets the header image URL, or restores the default when blank.
    #[must_use]
    pub fn with_header_image_url(mut self, url: Option<&str>) -> Self {
        self.header_image_url =
            non_blank(url).unwrap_or_else(|| DEFAULT_HEADER_IMAGE_URL.to_owned());
        self
    }

    /// Sets the biography.
    #[must_use]
    pub fn with_bio(mut self, bio: Option<&str>) -> Self {
        self.bio = non_blank(bio);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: Option<&str>) -> Self {
        self.location = non_blank(location);
        self
    }

    /// Returns the avatar URL.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Returns the header image URL.
    #[must_use]
    pub fn header_image_url(&self) -> &str {
        &self.header_image_url
    }

    /// Returns the biography, if any.
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            image_url: DEFAULT_IMAGE_URL.to_owned(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.to_owned(),
            bio: None,
            location: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}
