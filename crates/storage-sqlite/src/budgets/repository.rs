use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::budgets::{
    Budget, BudgetRepositoryTrait, BudgetUpdate, BudgetWithCategory, NewBudget,
};
use pennywise_core::Result;

use super::model::{BudgetChangesetDb, BudgetDb, NewBudgetDb};
use crate::categories::CategoryDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{budgets, categories};

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }

    fn join_category(row: (BudgetDb, Option<CategoryDb>)) -> BudgetWithCategory {
        let (budget, category) = row;
        BudgetWithCategory {
            budget: Budget::from(budget),
            category: category.map(Into::into),
        }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<BudgetWithCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .left_join(categories::table)
            .filter(budgets::user_id.eq(user_id))
            .order(budgets::created_at.desc())
            .select((BudgetDb::as_select(), Option::<CategoryDb>::as_select()))
            .load::<(BudgetDb, Option<CategoryDb>)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Self::join_category).collect())
    }

    fn get_by_id(&self, id: &str, user_id: &str) -> Result<Option<BudgetWithCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .left_join(categories::table)
            .filter(budgets::id.eq(id))
            .filter(budgets::user_id.eq(user_id))
            .select((BudgetDb::as_select(), Option::<CategoryDb>::as_select()))
            .first::<(BudgetDb, Option<CategoryDb>)>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Self::join_category))
    }

    fn list_for_category(
        &self,
        category_id: &str,
        user_id: &str,
    ) -> Result<Vec<BudgetWithCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .left_join(categories::table)
            .filter(budgets::category_id.eq(category_id))
            .filter(budgets::user_id.eq(user_id))
            .order(budgets::created_at.desc())
            .select((BudgetDb::as_select(), Option::<CategoryDb>::as_select()))
            .load::<(BudgetDb, Option<CategoryDb>)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Self::join_category).collect())
    }

    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = Utc::now().to_rfc3339();
                let row = NewBudgetDb {
                    id: Uuid::new_v4().to_string(),
                    user_id: user_id_owned,
                    category_id: new_budget.category_id,
                    amount: new_budget.amount.to_string(),
                    period: new_budget.period.as_str().to_string(),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let created = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDb::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Budget::from(created))
            })
            .await
    }

    async fn update(&self, id: &str, user_id: &str, update: BudgetUpdate) -> Result<Budget> {
        let id_owned = id.to_string();
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let changeset = BudgetChangesetDb {
                    category_id: update.category_id,
                    amount: update.amount.map(|a| a.to_string()),
                    period: update.period.map(|p| p.as_str().to_string()),
                    updated_at: Utc::now().to_rfc3339(),
                };

                let updated = diesel::update(
                    budgets::table
                        .find(&id_owned)
                        .filter(budgets::user_id.eq(&user_id_owned)),
                )
                .set(&changeset)
                .returning(BudgetDb::as_returning())
                .get_result(conn)
                .map_err(StorageError::from)?;
                Ok(Budget::from(updated))
            })
            .await
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budgets::table
                        .find(&id_owned)
                        .filter(budgets::user_id.eq(&user_id_owned)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
