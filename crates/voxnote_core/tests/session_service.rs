use std::cell::Cell;
use voxnote_core::model::user::DEFAULT_AVATAR_URL;
use voxnote_core::{
    CollabError, CollabResult, IdentityProvider, SessionError, SessionService, User, UserPatch,
    UserValidationError,
};

struct StaticIdentity {
    signed_out: Cell<bool>,
}

impl StaticIdentity {
    fn new() -> Self {
        Self {
            signed_out: Cell::new(false),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn sign_in(&self) -> CollabResult<User> {
        Ok(User::new("Ada", "ada@example.com", DEFAULT_AVATAR_URL))
    }

    fn sign_out(&self) -> CollabResult<()> {
        self.signed_out.set(true);
        Ok(())
    }
}

struct DeniedIdentity;

impl IdentityProvider for DeniedIdentity {
    fn sign_in(&self) -> CollabResult<User> {
        Err(CollabError::new("identity", "cancelled", "user closed the dialog"))
    }

    fn sign_out(&self) -> CollabResult<()> {
        Err(CollabError::new("identity", "offline", "no network"))
    }
}

#[test]
fn login_update_and_logout() {
    let identity = StaticIdentity::new();
    let mut session = SessionService::new();

    let user = session.login(&identity).unwrap();
    assert_eq!(user.display_name(), "Ada");

    let user = session.update_user(UserPatch::rename("  Grace  ")).unwrap();
    assert_eq!(user.name, "Grace");
    assert_eq!(user.email, "ada@example.com");

    session.logout(&identity).unwrap();
    assert!(identity.signed_out.get());
    assert!(session.current_user().is_none());
}

#[test]
fn blank_name_is_rejected_without_changes() {
    let mut session = SessionService::new();
    session.login(&StaticIdentity::new()).unwrap();

    assert_eq!(
        session.update_user(UserPatch::rename("   ")).unwrap_err(),
        SessionError::Validation(UserValidationError::EmptyName)
    );
    assert_eq!(session.current_user().unwrap().name, "Ada");
}

#[test]
fn update_requires_signed_in_user() {
    let mut session = SessionService::new();
    assert_eq!(
        session.update_user(UserPatch::rename("x")).unwrap_err(),
        SessionError::NotSignedIn
    );
}

#[test]
fn identity_failures_surface_and_logout_still_clears() {
    let mut session = SessionService::new();
    let err = session.login(&DeniedIdentity).unwrap_err();
    assert!(matches!(err, SessionError::Identity(ref inner) if inner.code == "cancelled"));
    assert!(!session.is_signed_in());

    session.login(&StaticIdentity::new()).unwrap();
    assert!(session.logout(&DeniedIdentity).is_err());
    assert!(!session.is_signed_in());
}
