use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::users::{NewUser, User, UserRepositoryTrait, UserUpdate};
use pennywise_core::Result;

use super::model::{NewUserDb, UserChangesetDb, UserDb};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(id)
            .first::<UserDb>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(user.map(User::from))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::username.eq(username))
            .first::<UserDb>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(user.map(User::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<UserDb>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(user.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().to_rfc3339();
                let row = NewUserDb {
                    id: Uuid::new_v4().to_string(),
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let created = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDb::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(created))
            })
            .await
    }

    async fn update(&self, id: &str, update: UserUpdate) -> Result<User> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let changeset = UserChangesetDb {
                    email: update.email,
                    password_hash: update.password_hash,
                    first_name: update.first_name,
                    last_name: update.last_name,
                    updated_at: Utc::now().to_rfc3339(),
                };

                diesel::update(users::table.find(&id_owned))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let updated = users::table
                    .find(&id_owned)
                    .first::<UserDb>(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(updated))
            })
            .await
    }
}
