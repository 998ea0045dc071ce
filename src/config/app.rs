//! Application configuration loading from config.toml
//!
//! The file names the navigation destinations the guard and the security notice
//! point at, the reward rate applied on order completion, and the table of
//! protected routes with the roles allowed to reach each of them.

use crate::core::{
    guard::{DEFAULT_LOGIN_PATH, RouteGuard},
    notice::DEFAULT_SETTINGS_PATH,
    role::Role,
};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable overriding the location of config.toml
pub const CONFIG_PATH_VAR: &str = "PRINTSHOP_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Where unauthenticated visitors are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Where the change-password prompt leads
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
    /// Points granted per currency unit of `total_price` when an order completes
    #[serde(default = "default_points_rate")]
    pub points_per_currency_unit: f64,
    /// Protected views
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A protected view and the roles allowed to see it
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Path of the view, e.g. `/admin/dashboard`
    pub path: String,
    /// Roles allowed through the guard
    pub allowed_roles: Vec<Role>,
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_settings_path() -> String {
    DEFAULT_SETTINGS_PATH.to_string()
}

const fn default_points_rate() -> f64 {
    1.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            settings_path: default_settings_path(),
            points_per_currency_unit: default_points_rate(),
            routes: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Looks up the protected route registered for `path`.
    ///
    /// # Errors
    /// Returns [`Error::RouteNotFound`] when no route with that exact path is configured.
    pub fn route(&self, path: &str) -> Result<&RouteConfig> {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .ok_or_else(|| Error::RouteNotFound {
                path: path.to_string(),
            })
    }

    /// Builds the guard protecting `path`, redirecting to the configured login page.
    ///
    /// # Errors
    /// Returns [`Error::RouteNotFound`] for unknown paths and [`Error::EmptyAllowList`]
    /// for a route configured with no roles.
    pub fn guard_for(&self, path: &str) -> Result<RouteGuard> {
        let route = self.route(path)?;
        Ok(RouteGuard::new(route.allowed_roles.iter().cloned())?
            .with_login_path(self.login_path.clone()))
    }
}

/// Parses configuration from TOML text, rejecting an unusable reward rate.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if !config.points_per_currency_unit.is_finite() || config.points_per_currency_unit < 0.0 {
        return Err(Error::Config {
            message: format!(
                "points_per_currency_unit must be a non-negative number, got {}",
                config.points_per_currency_unit
            ),
        });
    }

    Ok(config)
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A route is missing its path or allowed roles
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Loads configuration from `$PRINTSHOP_CONFIG`, or `./config.toml` when unset.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let toml_str = r#"
            login_path = "/auth/login"
            points_per_currency_unit = 0.5

            [[routes]]
            path = "/admin/dashboard"
            allowed_roles = ["admin"]

            [[routes]]
            path = "/local/orders"
            allowed_roles = ["local", "admin"]
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.login_path, "/auth/login");
        assert_eq!(config.settings_path, "/settings");
        assert_eq!(config.points_per_currency_unit, 0.5);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].allowed_roles, vec![Role::Local, Role::Admin]);
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = parse_config("").unwrap();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.points_per_currency_unit, 1.0);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_unknown_roles_are_preserved() {
        let toml_str = r#"
            [[routes]]
            path = "/reports"
            allowed_roles = ["auditor"]
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(
            config.routes[0].allowed_roles,
            vec![Role::Other("auditor".to_string())]
        );
    }

    #[test]
    fn test_negative_points_rate_rejected() {
        let result = parse_config("points_per_currency_unit = -1.0");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_route_lookup() {
        let config = parse_config(
            r#"
            [[routes]]
            path = "/client"
            allowed_roles = ["client"]
            "#,
        )
        .unwrap();

        assert!(config.route("/client").is_ok());
        assert!(matches!(
            config.route("/nowhere"),
            Err(Error::RouteNotFound { .. })
        ));
    }

    #[test]
    fn test_guard_for_uses_login_path() {
        let config = parse_config(
            r#"
            login_path = "/entrar"

            [[routes]]
            path = "/admin/dashboard"
            allowed_roles = ["admin"]

            [[routes]]
            path = "/closed"
            allowed_roles = []
            "#,
        )
        .unwrap();

        let guard = config.guard_for("/admin/dashboard").unwrap();
        assert!(guard.allowed_roles().contains(&Role::Admin));
        let decision = guard.evaluate(&crate::core::session::AuthState::signed_out());
        assert!(matches!(
            decision,
            crate::core::guard::Decision::Deny { ref redirect, .. } if redirect.to == "/entrar"
        ));

        assert!(matches!(config.guard_for("/closed"), Err(Error::EmptyAllowList)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
