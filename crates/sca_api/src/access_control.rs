//! Typed endpoints of the access-control API.

use crate::error::Result;
use crate::models::{Role, Team, UpdateUser, User};
use crate::transport::Session;

/// Authenticated view over the access-control API.
#[derive(Debug)]
pub struct AccessControlClient<'a> {
    session: Session<'a>,
}

impl<'a> AccessControlClient<'a> {
    pub(crate) const fn new(session: Session<'a>) -> Self {
        Self { session }
    }

    /// Lists every team.
    pub async fn teams(&self) -> Result<Vec<Team>> {
        self.session.get("Teams").await
    }

    /// Lists every role.
    pub async fn roles(&self) -> Result<Vec<Role>> {
        self.session.get("Roles").await
    }

    /// Lists every user with full details.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.session.get("Users").await
    }

    /// Fetches one user.
    pub async fn user(&self, user_id: i64) -> Result<User> {
        self.session.get(&format!("Users/{user_id}")).await
    }

    /// Replaces a user's details.
    pub async fn update_user(&self, user_id: i64, update: &UpdateUser) -> Result<()> {
        self.session.put_empty(&format!("Users/{user_id}"), update).await
    }
}
