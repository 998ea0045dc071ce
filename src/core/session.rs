//! Resolved authentication state and the providers that produce it.
//!
//! The guard never looks anything up itself. A [`SessionProvider`] resolves the
//! session, user, and profile up front and hands the guard an [`AuthState`] value.

use crate::{
    core::profile::{self, Profile},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::debug;

/// Evidence that someone authenticated in the current browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// User the session was issued to
    pub user_id: String,
}

/// Identity record of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Account id, also the profile primary key
    pub id: String,
}

/// Snapshot of `{session, user, profile, loading}` as seen by the guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Present once a session exists
    pub session: Option<Session>,
    /// Present once the user record resolved
    pub user: Option<User>,
    /// Present once the profile row resolved
    pub profile: Option<Profile>,
    /// True while any of the above is still being fetched
    pub loading: bool,
}

impl AuthState {
    /// State while the provider is still resolving.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Resolved state with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Resolved state for a signed-in user, with or without a profile row.
    #[must_use]
    pub fn signed_in(user_id: impl Into<String>, profile: Option<Profile>) -> Self {
        let user_id = user_id.into();
        Self {
            session: Some(Session {
                user_id: user_id.clone(),
            }),
            user: Some(User { id: user_id }),
            profile,
            loading: false,
        }
    }
}

/// Supplies the resolved authentication state.
pub trait SessionProvider {
    /// Resolves session, user, and profile.
    fn resolve(&self) -> impl Future<Output = Result<AuthState>> + Send;
}

/// Resolves a session for an already authenticated user id against the profile store.
///
/// Token validation happens upstream; this provider only trusts the id it is given.
#[derive(Debug, Clone)]
pub struct StoreSessionProvider {
    database: DatabaseConnection,
    user_id: Option<String>,
}

impl StoreSessionProvider {
    /// Creates a provider for `user_id`, `None` meaning nobody is signed in.
    #[must_use]
    pub const fn new(database: DatabaseConnection, user_id: Option<String>) -> Self {
        Self { database, user_id }
    }
}

impl SessionProvider for StoreSessionProvider {
    async fn resolve(&self) -> Result<AuthState> {
        let Some(user_id) = self.user_id.as_deref() else {
            debug!("No authenticated user, resolving signed-out state");
            return Ok(AuthState::signed_out());
        };

        let profile = profile::get_profile(&self.database, user_id).await?;
        debug!(user_id, has_profile = profile.is_some(), "Session resolved");
        Ok(AuthState::signed_in(user_id, profile))
    }
}
