//! Session owner model.
//!
//! # Responsibility
//! - Hold the identity supplied by the identity collaborator at login.
//! - Apply partial profile edits without touching unrelated fields.
//!
//! # Invariants
//! - A merged `name` is trimmed and never blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Avatar shown when the identity provider supplies no photo.
pub const DEFAULT_AVATAR_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=default";

const FALLBACK_DISPLAY_NAME: &str = "Workspace";

/// Profile validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be blank"),
        }
    }
}

impl Error for UserValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub photo_url: String,
}

/// Partial update for [`User`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl UserPatch {
    /// Patch that only renames the user, the single edit the account screen offers.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            photo_url: photo_url.into(),
        }
    }

    /// Merges `patch` into this user.
    ///
    /// The patch is validated first, so a rejected patch leaves the user
    /// unchanged.
    pub fn merge(&mut self, patch: UserPatch) -> Result<(), UserValidationError> {
        let name = match patch.name {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(UserValidationError::EmptyName);
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(photo_url) = patch.photo_url {
            self.photo_url = photo_url;
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            FALLBACK_DISPLAY_NAME
        } else {
            self.name.as_str()
        }
    }

    pub fn avatar_url(&self) -> &str {
        if self.photo_url.trim().is_empty() {
            DEFAULT_AVATAR_URL
        } else {
            self.photo_url.as_str()
        }
    }
}
