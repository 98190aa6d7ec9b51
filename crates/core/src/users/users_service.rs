use crate::errors::{Error, Result, ValidationError};
use crate::users::users_model::{NewUser, User, UserUpdate};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

/// Cheap structural check; deliverability is not our problem.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { user_repo }
    }

    fn normalize_email(email: Option<String>) -> Result<Option<String>> {
        match email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                if !is_valid_email(&email) {
                    return Err(ValidationError::InvalidInput(
                        "Please provide a valid email address".to_string(),
                    )
                    .into());
                }
                Ok(Some(email))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.user_repo.find_by_id(id)
    }

    fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo.find_by_username(username)
    }

    async fn register(&self, mut new_user: NewUser) -> Result<User> {
        if new_user.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username".to_string()).into());
        }
        new_user.email = Self::normalize_email(new_user.email)?;

        if self
            .user_repo
            .find_by_username(&new_user.username)?
            .is_some()
        {
            return Err(Error::ConstraintViolation(
                "Username is already taken".to_string(),
            ));
        }
        if let Some(email) = &new_user.email {
            if self.user_repo.find_by_email(email)?.is_some() {
                return Err(Error::ConstraintViolation(
                    "User with this email already exists".to_string(),
                ));
            }
        }

        self.user_repo.create(new_user).await
    }

    async fn update_profile(&self, id: &str, mut update: UserUpdate) -> Result<User> {
        update.email = Self::normalize_email(update.email)?;
        if let Some(email) = &update.email {
            if let Some(existing) = self.user_repo.find_by_email(email)? {
                if existing.id != id {
                    return Err(Error::ConstraintViolation(
                        "User with this email already exists".to_string(),
                    ));
                }
            }
        }
        self.user_repo.update(id, update).await
    }
}
