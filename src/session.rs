use crate::models::{AuthToken, User};

/// Authenticated identity held for the lifetime of a login.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user: User,
    pub token: AuthToken,
}

/// Login state for one running app.
///
/// Created once at startup and passed by reference to whatever needs it;
/// `establish` after a verified login, `clear` on logout. There is no
/// ambient storage behind this, the value itself is the whole session.
#[derive(Debug, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn establish(&mut self, user: User, token: AuthToken) {
        self.identity = Some(Identity { user, token });
    }

    pub fn clear(&mut self) {
        self.identity = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.identity.as_ref().map(|i| &i.user)
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.identity.as_ref().map(|i| &i.token)
    }
}
