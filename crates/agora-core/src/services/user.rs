use std::sync::Arc;

use crate::domain::{NewUser, User};
use crate::error::{DomainError, DomainResult};
use crate::ports::UserRepository;

const ENTITY: &str = "User";

/// User management.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create(&self, input: NewUser) -> DomainResult<User> {
        let user = self.users.create(input).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    /// Case-insensitive substring search on the user name.
    pub async fn search(&self, name: &str) -> DomainResult<Vec<User>> {
        Ok(self.users.find_by_name_containing(name).await?)
    }

    /// Overwrite name, mobile number and email. Identity is kept.
    pub async fn update(&self, id: i64, changes: NewUser) -> DomainResult<User> {
        let mut user = self.get(id).await?;
        user.apply(changes);

        let updated = self
            .users
            .update(user)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(user_id = id, "User updated");
        Ok(updated)
    }

    /// Delete a user together with everything the user owns.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.users
            .delete_cascade(id)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
