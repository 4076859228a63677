//! User data model and partial updates.

use serde::Serialize;

use super::{TeamName, UserId};

/// Team member eligible (when active) to review pull requests.
///
/// ## Invariants
/// - A user belongs to exactly one team at a time.
/// - Users are never deleted; reconciliation moves them between teams and
///   toggles `is_active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    user_id: UserId,
    username: String,
    team_name: TeamName,
    is_active: bool,
}

impl User {
    /// Build a user from validated components.
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        team_name: TeamName,
        is_active: bool,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            team_name,
            is_active,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.user_id
    }

    /// Display username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Team the user currently belongs to.
    pub fn team_name(&self) -> &TeamName {
        &self.team_name
    }

    /// Whether the user may be picked as a reviewer.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Apply a partial update in place; absent fields are left untouched.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(username) = patch.username() {
            username.clone_into(&mut self.username);
        }
        if let Some(team_name) = patch.team_name() {
            self.team_name = team_name.clone();
        }
        if let Some(is_active) = patch.is_active() {
            self.is_active = is_active;
        }
    }

    /// Toggle reviewing eligibility.
    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}

/// Partial user update.
///
/// Every field tracks presence independently so "leave unchanged" and
/// "set to an empty string / `false`" stay distinguishable.
///
/// # Examples
/// ```
/// use review_service::domain::{TeamName, UserPatch};
///
/// let team = TeamName::new("backend").expect("valid team");
/// let patch = UserPatch::new()
///     .with_username("")
///     .with_team_name(team)
///     .with_active(false);
/// assert_eq!(patch.username(), Some(""));
/// assert_eq!(patch.is_active(), Some(false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    username: Option<String>,
    team_name: Option<TeamName>,
    is_active: Option<bool>,
}

impl UserPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Move the user to another team.
    #[must_use]
    pub fn with_team_name(mut self, team_name: TeamName) -> Self {
        self.team_name = Some(team_name);
        self
    }

    /// Set reviewing eligibility.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Username to write, if present.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Team to move the user to, if present.
    pub fn team_name(&self) -> Option<&TeamName> {
        self.team_name.as_ref()
    }

    /// Eligibility flag to write, if present.
    pub fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    /// Returns `true` when no field is present.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.team_name.is_none() && self.is_active.is_none()
    }
}
