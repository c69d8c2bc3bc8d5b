//! The logged-in user's session.
//!
//! A session is an explicit value handed to whatever needs to know who is
//! acting. It can be read from the `{"type": ..., "email": ...}` payload the web
//! client keeps under its `user` storage key.

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Kind of account behind a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserType {
    /// Submits bills and sees their own
    #[default]
    Employee,
    /// Sees every bill and reviews pending ones
    Admin,
}

/// Identity of the user the form and views act for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account type
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// Email owning the bills; may be empty in legacy payloads
    #[serde(default)]
    pub email: String,
}

impl Session {
    /// Creates a session for the given account.
    #[must_use]
    pub const fn new(user_type: UserType, email: String) -> Self {
        Self { user_type, email }
    }

    /// Parses a stored `user` payload such as `{"type":"Employee","email":"a@a"}`.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(Into::into)
    }

    /// Returns true for administrator sessions.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}
