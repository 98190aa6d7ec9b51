use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::categories::{
    Category, CategoryKind, CategoryRepositoryTrait, CategoryUpdate, NewCategory,
};
use pennywise_core::errors::{DatabaseError, Error};
use pennywise_core::Result;

use super::model::{CategoryChangesetDb, CategoryDb, NewCategoryDb};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list_visible(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(
                categories::user_id
                    .is_null()
                    .or(categories::user_id.eq(user_id)),
            )
            .order((categories::kind.asc(), categories::name.asc()))
            .load::<CategoryDb>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn list_visible_by_kind(&self, user_id: &str, kind: CategoryKind) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(
                categories::user_id
                    .is_null()
                    .or(categories::user_id.eq(user_id)),
            )
            .filter(categories::kind.eq(kind.as_str()))
            .order(categories::name.asc())
            .load::<CategoryDb>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn get_visible(&self, id: &str, user_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories::table
            .find(id)
            .filter(
                categories::user_id
                    .is_null()
                    .or(categories::user_id.eq(user_id)),
            )
            .first::<CategoryDb>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Category::from))
    }

    async fn create(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let now = Utc::now().to_rfc3339();
                let row = NewCategoryDb {
                    id: Uuid::new_v4().to_string(),
                    user_id: Some(user_id_owned),
                    name: new_category.name,
                    color: new_category.color,
                    icon: new_category.icon,
                    kind: new_category.kind.as_str().to_string(),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let created = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDb::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(created))
            })
            .await
    }

    async fn update(&self, id: &str, user_id: &str, update: CategoryUpdate) -> Result<Category> {
        let id_owned = id.to_string();
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let changeset = CategoryChangesetDb {
                    name: update.name,
                    color: update.color,
                    icon: update.icon,
                    kind: update.kind.map(|k| k.as_str().to_string()),
                    updated_at: Utc::now().to_rfc3339(),
                };

                // Only user-owned rows are updatable; global rows read as
                // missing here so they cannot be edited through this path.
                let affected = diesel::update(
                    categories::table
                        .find(&id_owned)
                        .filter(categories::user_id.eq(&user_id_owned)),
                )
                .set(&changeset)
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Category {}",
                        id_owned
                    ))));
                }

                let updated = categories::table
                    .find(&id_owned)
                    .first::<CategoryDb>(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(updated))
            })
            .await
    }
}
