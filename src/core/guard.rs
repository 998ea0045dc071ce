//! Role-based route guard.
//!
//! [`RouteGuard::evaluate`] is a pure decision over a resolved [`AuthState`]. The checks
//! run in a fixed order, each one assuming the previous ones passed:
//!
//! 1. still loading: show the authenticating placeholder, nothing else
//! 2. no session or no user: notify and send to the login page
//! 3. no profile: notify and send to the login page
//! 4. role not allowed: notify and send to the role's landing page
//! 5. otherwise render the protected view
//!
//! [`RouteGuard::render`] is the thin adapter that turns a decision into effects on a
//! [`Notifier`] and a [`Navigator`].

use crate::{
    core::{role::Role, session::AuthState},
    errors::{Error, Result},
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Shown when nobody is signed in.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "Debes iniciar sesión para acceder a esta página.";
/// Shown when the account has no profile row.
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "No se encontró tu perfil. Inicia sesión nuevamente.";
/// Shown when the profile's role is not on the allow-list.
pub const NOT_AUTHORIZED_MESSAGE: &str = "No tienes permiso para acceder a esta página.";

/// Default destination for unauthenticated visitors.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Why a visitor was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenial {
    /// No session or no user
    NotAuthenticated,
    /// Session exists but the profile record does not
    ProfileMissing,
    /// Authenticated, but the role is not allowed here
    RoleForbidden {
        /// Role the profile carries
        role: Role,
    },
}

impl AccessDenial {
    /// User-facing text for the notification channel.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => SIGN_IN_REQUIRED_MESSAGE,
            Self::ProfileMissing => PROFILE_NOT_FOUND_MESSAGE,
            Self::RoleForbidden { .. } => NOT_AUTHORIZED_MESSAGE,
        }
    }
}

/// Declarative navigation instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target path
    pub to: String,
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Session still resolving
    Resolving,
    /// Access denied; notify, then redirect
    Deny {
        /// Reason, carries the notification text
        denial: AccessDenial,
        /// Where to send the visitor
        redirect: Redirect,
    },
    /// Access granted
    Authorized,
}

/// Receives user-facing error messages. Fire-and-forget.
pub trait Notifier {
    /// Shows an error message.
    fn show_error(&self, message: &str);
}

/// Receives redirect instructions.
pub trait Navigator {
    /// Navigates to `redirect.to`.
    fn redirect(&self, redirect: &Redirect);
}

/// Notifier that only logs, for contexts without a toast channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_error(&self, message: &str) {
        warn!("{message}");
    }
}

/// What the protected slot ends up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// Blocking "authenticating" placeholder
    Authenticating,
    /// Visitor was redirected; nothing is shown
    Redirected(Redirect),
    /// The protected view, unmodified
    Children(T),
}

/// Gate for a subtree that only some roles may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed_roles: BTreeSet<Role>,
    login_path: String,
}

impl RouteGuard {
    /// Builds a guard redirecting unauthenticated visitors to [`DEFAULT_LOGIN_PATH`].
    ///
    /// # Errors
    /// Returns [`Error::EmptyAllowList`] if `allowed_roles` yields nothing.
    pub fn new(allowed_roles: impl IntoIterator<Item = Role>) -> Result<Self> {
        let allowed_roles: BTreeSet<Role> = allowed_roles.into_iter().collect();
        if allowed_roles.is_empty() {
            return Err(Error::EmptyAllowList);
        }

        Ok(Self {
            allowed_roles,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        })
    }

    /// Uses `login_path` instead of [`DEFAULT_LOGIN_PATH`].
    #[must_use]
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    /// Roles this guard lets through.
    #[must_use]
    pub const fn allowed_roles(&self) -> &BTreeSet<Role> {
        &self.allowed_roles
    }

    /// Decides what to do for `state`. Pure; safe to call on every render.
    #[must_use]
    pub fn evaluate(&self, state: &AuthState) -> Decision {
        if state.loading {
            return Decision::Resolving;
        }

        if state.session.is_none() || state.user.is_none() {
            return self.deny_to_login(AccessDenial::NotAuthenticated);
        }

        let Some(profile) = state.profile.as_ref() else {
            return self.deny_to_login(AccessDenial::ProfileMissing);
        };

        if self.allowed_roles.contains(&profile.role) {
            return Decision::Authorized;
        }

        Decision::Deny {
            redirect: Redirect {
                to: profile.role.landing_path().to_string(),
                replace: true,
            },
            denial: AccessDenial::RoleForbidden {
                role: profile.role.clone(),
            },
        }
    }

    fn deny_to_login(&self, denial: AccessDenial) -> Decision {
        Decision::Deny {
            denial,
            redirect: Redirect {
                to: self.login_path.clone(),
                replace: true,
            },
        }
    }

    /// Evaluates `state` and applies the effects: at most one notification, issued
    /// before the redirect, and `children` only when access is granted.
    pub fn render<T>(
        &self,
        state: &AuthState,
        children: T,
        notifier: &impl Notifier,
        navigator: &impl Navigator,
    ) -> Rendered<T> {
        match self.evaluate(state) {
            Decision::Resolving => Rendered::Authenticating,
            Decision::Authorized => Rendered::Children(children),
            Decision::Deny { denial, redirect } => {
                debug!(?denial, to = %redirect.to, "Access denied");
                notifier.show_error(denial.message());
                navigator.redirect(&redirect);
                Rendered::Redirected(redirect)
            }
        }
    }
}
