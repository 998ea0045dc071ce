//! Account roles and where each of them lands after a denied visit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access-level tag carried by a profile.
///
/// Role strings outside the three known ones are kept verbatim in [`Role::Other`];
/// they never match a known role and land on the generic home page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Platform administrator
    Admin,
    /// Staff member of a local print shop
    Local,
    /// Customer submitting print jobs
    Client,
    /// Any role this build does not know about
    Other(String),
}

/// Landing page for each known role.
const LANDING_PATHS: [(Role, &str); 3] = [
    (Role::Admin, "/admin/dashboard"),
    (Role::Local, "/local/dashboard"),
    (Role::Client, "/client"),
];

/// Landing page for roles missing from [`LANDING_PATHS`].
pub const DEFAULT_LANDING_PATH: &str = "/";

impl Role {
    /// Parses a stored role string. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "local" => Self::Local,
            "client" => Self::Client,
            other => Self::Other(other.to_string()),
        }
    }

    /// The string stored in the `profiles.role` column.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Local => "local",
            Self::Client => "client",
            Self::Other(value) => value,
        }
    }

    /// Where a profile with this role is sent when it may not see a page.
    #[must_use]
    pub fn landing_path(&self) -> &'static str {
        LANDING_PATHS
            .iter()
            .find(|(role, _)| role == self)
            .map_or(DEFAULT_LANDING_PATH, |(_, path)| *path)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Self::Admin,
            "local" => Self::Local,
            "client" => Self::Client,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("local"), Role::Local);
        assert_eq!(Role::parse("client"), Role::Client);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Role::parse("Admin"), Role::Other("Admin".to_string()));
        assert_eq!(Role::parse(""), Role::Other(String::new()));
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Admin.landing_path(), "/admin/dashboard");
        assert_eq!(Role::Local.landing_path(), "/local/dashboard");
        assert_eq!(Role::Client.landing_path(), "/client");
        assert_eq!(Role::parse("printer").landing_path(), "/");
    }

    #[test]
    fn test_string_conversion_keeps_unknown_roles() {
        let role = Role::from("auditor".to_string());
        assert_eq!(role.as_str(), "auditor");
        assert_eq!(String::from(role), "auditor");
        assert_eq!(String::from(Role::Local), "local");
        assert_eq!(Role::Client.to_string(), "client");
    }
}
