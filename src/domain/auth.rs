use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Identity stored in the session cookie after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Identifier of the user record.
    pub id: i32,
    /// Login name. Customers use their lower-cased email.
    pub username: String,
    pub email: String,
    /// Display name.
    pub name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Set when the session was opened through the seller login.
    #[serde(default)]
    pub seller_session: bool,
}

impl AuthenticatedUser {
    /// Build the session identity for `user`.
    pub fn from_user(user: &User, seller_session: bool) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            seller_session,
        }
    }
}

/// Seller predicates backed by the configured allow-list of usernames.
#[derive(Debug, Clone, Default)]
pub struct SellerAccess {
    usernames: HashSet<String>,
}

impl SellerAccess {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma separated list such as `"seller, manager"`.
    pub fn from_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn is_allow_listed(&self, username: &str) -> bool {
        self.usernames.contains(username)
    }

    /// Staff, superusers and allow-listed usernames see and edit every order.
    pub fn is_seller_admin(&self, user: &AuthenticatedUser) -> bool {
        self.is_seller_account(user.is_staff, user.is_superuser, &user.username)
    }

    /// Same check as [`Self::is_seller_admin`] for a user record that has
    /// not logged in yet.
    pub fn is_seller_account(&self, is_staff: bool, is_superuser: bool, username: &str) -> bool {
        is_staff || is_superuser || self.is_allow_listed(username)
    }

    pub fn is_seller(&self, user: &AuthenticatedUser) -> bool {
        self.is_seller_admin(user) || user.seller_session
    }
}
