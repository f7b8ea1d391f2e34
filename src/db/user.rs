//! User model for forumlist.
//!
//! This module defines the User struct and the Role enum used to pick the
//! precomputed forum ACL for a viewer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Viewer role. Forum ACLs are precomputed per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Role {
    /// Anonymous visitor.
    Guest = 0,
    /// Registered member.
    #[default]
    Member = 1,
    /// Forum moderator.
    Moderator = 2,
    /// Administrator.
    Admin = 3,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Member => "member",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "member" => Ok(Role::Member),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// Registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Username (unique).
    pub username: String,
    /// URL slug of the username.
    pub slug: String,
    /// Role used for ACL lookups.
    pub role: Role,
    /// Registration timestamp. Threads last posted before this count as read.
    pub joined_on: DateTime<Utc>,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Username.
    pub username: String,
    /// Role (defaults to Member).
    pub role: Role,
    /// Registration timestamp (defaults to now).
    pub joined_on: DateTime<Utc>,
}

impl NewUser {
    /// Create a new member joining now.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Member,
            joined_on: Utc::now(),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the registration timestamp.
    pub fn with_joined_on(mut self, joined_on: DateTime<Utc>) -> Self {
        self.joined_on = joined_on;
        self
    }
}

/// Who is looking at a page.
#[derive(Debug, Clone, Default)]
pub enum Viewer {
    /// No valid token was presented.
    #[default]
    Anonymous,
    /// A signed-in, active user.
    User(User),
}

impl Viewer {
    /// Role used to pick the forum ACL.
    pub fn role(&self) -> Role {
        match self {
            Viewer::Anonymous => Role::Guest,
            Viewer::User(user) => user.role,
        }
    }

    /// User ID, if signed in.
    pub fn user_id(&self) -> Option<i64> {
        self.user().map(|u| u.id)
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<&User> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::User(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str_round_trip() {
        for role in [Role::Guest, Role::Member, Role::Moderator, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_from_str_case_insensitive() {
        assert_eq!("MODERATOR".parse::<Role>().unwrap(), Role::Moderator);
        assert!("sysop".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin > Role::Moderator);
        assert!(Role::Member > Role::Guest);
    }

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new("alice");
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Member);
    }

    #[test]
    fn test_viewer() {
        let anonymous = Viewer::Anonymous;
        assert_eq!(anonymous.role(), Role::Guest);
        assert_eq!(anonymous.user_id(), None);
        assert!(!anonymous.is_authenticated());

        let viewer = Viewer::User(User {
            id: 7,
            username: "mod".to_string(),
            slug: "mod".to_string(),
            role: Role::Moderator,
            joined_on: Utc::now(),
            is_active: true,
        });
        assert_eq!(viewer.role(), Role::Moderator);
        assert_eq!(viewer.user_id(), Some(7));
        assert!(viewer.is_authenticated());
    }
}
