#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::users::{NewUser, User, UserRepositoryTrait, UserService, UserServiceTrait, UserUpdate};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn find_by_id(&self, id: &str) -> Result<Option<User>> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        fn find_by_username(&self, username: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.as_deref() == Some(email))
                .cloned())
        }

        async fn create(&self, new_user: NewUser) -> Result<User> {
            let user = User {
                id: format!("user-{}", self.users.lock().unwrap().len() + 1),
                username: new_user.username,
                email: new_user.email,
                password_hash: new_user.password_hash,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            };
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn update(&self, _id: &str, _update: UserUpdate) -> Result<User> {
            unimplemented!()
        }
    }

    fn new_user(username: &str, email: Option<&str>) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.map(str::to_string),
            password_hash: "$argon2id$stub".to_string(),
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn register_lowercases_the_email() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let user = service
            .register(new_user("sam", Some("Sam@Example.COM")))
            .await
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("sam@example.com"));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = MockUserRepository::default();
        let service = UserService::new(Arc::new(repo));
        service.register(new_user("sam", None)).await.unwrap();

        let result = service.register(new_user("sam", None)).await;
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        service
            .register(new_user("sam", Some("sam@example.com")))
            .await
            .unwrap();

        let result = service
            .register(new_user("pat", Some("sam@example.com")))
            .await;
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        for email in ["not-an-email", "a@b", "a @b.com", "@b.com"] {
            let result = service.register(new_user("sam", Some(email))).await;
            assert!(matches!(result, Err(Error::Validation(_))), "{}", email);
        }
    }

    #[tokio::test]
    async fn blank_username_is_rejected() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let result = service.register(new_user("  ", None)).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
