use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserUpdate};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn update(&self, id: &str, update: UserUpdate) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, id: &str) -> Result<Option<User>>;

    /// Lookup for login; the caller verifies the password hash.
    fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Register a new user. Duplicate usernames and emails are rejected
    /// before insertion.
    async fn register(&self, new_user: NewUser) -> Result<User>;

    async fn update_profile(&self, id: &str, update: UserUpdate) -> Result<User>;
}
