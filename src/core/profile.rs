//! Profile business logic - Creating and fetching profile records.
//!
//! Profiles are provisioned by the account service; this module gives the rest of the
//! crate a typed view over them and the few store operations the gate needs.

use crate::{
    core::role::Role,
    entities::{Profile as ProfileEntity, profile},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, Set, prelude::*};
use tracing::info;

/// Typed view of a profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Authenticated user id
    pub id: String,
    /// Parsed role
    pub role: Role,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Shop a `local` staff member works for
    pub local_id: Option<i64>,
    /// Temporary-password flag
    pub must_change_password: bool,
}

impl Profile {
    /// Whether the parent page should show the security notice.
    #[must_use]
    pub const fn requires_password_change(&self) -> bool {
        self.must_change_password
    }

    /// First and last name joined by a space, skipping missing parts.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl From<profile::Model> for Profile {
    fn from(model: profile::Model) -> Self {
        Self {
            role: Role::from(model.role),
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            local_id: model.local_id,
            must_change_password: model.must_change_password,
        }
    }
}

pub(crate) fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Fields needed to provision a profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    /// Authenticated user id the profile belongs to
    pub id: String,
    /// Role to grant
    pub role: Role,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Shop for `local` staff
    pub local_id: Option<i64>,
    /// Start with a temporary password
    pub must_change_password: bool,
}

/// Inserts a new profile.
///
/// # Errors
/// Returns an error if the id is empty or the insert fails (including a duplicate id).
pub async fn create_profile<C: ConnectionTrait>(db: &C, new: NewProfile) -> Result<Profile> {
    if new.id.trim().is_empty() {
        return Err(Error::Config {
            message: "Profile id cannot be empty".to_string(),
        });
    }

    let model = profile::ActiveModel {
        id: Set(new.id),
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        role: Set(new.role.to_string()),
        local_id: Set(new.local_id),
        must_change_password: Set(new.must_change_password),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await?;

    info!(profile_id = %model.id, role = %model.role, "Profile created");
    Ok(model.into())
}

/// Fetches a profile by user id, `None` when the account has no profile row.
pub async fn get_profile<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<Option<Profile>> {
    Ok(ProfileEntity::find_by_id(user_id.to_string())
        .one(db)
        .await?
        .map(Profile::from))
}

/// Clears the temporary-password flag after the user picked a new password.
///
/// # Errors
/// Returns [`Error::ProfileNotFound`] if no profile exists for `user_id`.
pub async fn clear_password_change_flag<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> Result<Profile> {
    let mut model: profile::ActiveModel = ProfileEntity::find_by_id(user_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            id: user_id.to_string(),
        })?
        .into();

    model.must_change_password = Set(false);
    Ok(model.update(db).await?.into())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_display_name() {
        assert_eq!(join_name(Some("Ana"), Some("Ruiz")), Some("Ana Ruiz".to_string()));
        assert_eq!(join_name(None, Some("Ruiz")), Some("Ruiz".to_string()));
        assert_eq!(join_name(Some("  "), None), None);
        assert_eq!(join_name(None, None), None);
    }

    #[tokio::test]
    async fn test_create_and_get_profile() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_profile(&db, "u-1", Role::Client).await?;

        let found = get_profile(&db, "u-1").await?.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.role, Role::Client);

        assert!(get_profile(&db, "missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_role_round_trips_through_store() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "u-2", Role::parse("auditor")).await?;

        let found = get_profile(&db, "u-2").await?.unwrap();
        assert_eq!(found.role, Role::Other("auditor".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_id_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_test_profile(&db, " ", Role::Admin).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_password_change_flag() -> Result<()> {
        let db = setup_test_db().await?;
        create_profile(
            &db,
            NewProfile {
                must_change_password: true,
                ..new_profile("u-3", Role::Local)
            },
        )
        .await?;

        let before = get_profile(&db, "u-3").await?.unwrap();
        assert!(before.requires_password_change());

        let after = clear_password_change_flag(&db, "u-3").await?;
        assert!(!after.requires_password_change());

        let result = clear_password_change_flag(&db, "nobody").await;
        assert!(matches!(result, Err(Error::ProfileNotFound { .. })));
        Ok(())
    }
}
