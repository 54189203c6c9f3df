//! Session owner use-cases.
//!
//! # Responsibility
//! - Hold the signed-in user supplied by the identity collaborator.
//! - Apply partial profile updates.
//!
//! # Invariants
//! - At most one user is signed in.
//! - The session has no relationship to notes beyond display.

use crate::collab::{CollabError, IdentityProvider};
use crate::model::user::{User, UserPatch, UserValidationError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation needs a signed-in user.
    NotSignedIn,
    Validation(UserValidationError),
    Identity(CollabError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSignedIn => write!(f, "no user is signed in"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Identity(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotSignedIn => None,
            Self::Validation(err) => Some(err),
            Self::Identity(err) => Some(err),
        }
    }
}

impl From<UserValidationError> for SessionError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CollabError> for SessionError {
    fn from(value: CollabError) -> Self {
        Self::Identity(value)
    }
}

#[derive(Debug, Default)]
pub struct SessionService {
    user: Option<User>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signs in through `identity`, replacing any current user.
    pub fn login(&mut self, identity: &dyn IdentityProvider) -> Result<&User, SessionError> {
        let user = identity.sign_in()?;
        info!("event=session_login module=session status=ok");
        Ok(&*self.user.insert(user))
    }

    /// Signs out through `identity` and clears the session.
    ///
    /// The local session is cleared even when the provider reports an error.
    pub fn logout(&mut self, identity: &dyn IdentityProvider) -> Result<(), SessionError> {
        self.user = None;
        identity.sign_out()?;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Merges `patch` into the signed-in user.
    pub fn update_user(&mut self, patch: UserPatch) -> Result<&User, SessionError> {
        let user = self.user.as_mut().ok_or(SessionError::NotSignedIn)?;
        user.merge(patch)?;
        Ok(&*user)
    }
}
