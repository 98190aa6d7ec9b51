use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
    TransactionWithCategory,
};
use pennywise_core::Result;

use super::model::{encode_tags, NewTransactionDb, TransactionChangesetDb, TransactionDb};
use crate::categories::CategoryDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::parsing::parse_decimal;
use crate::schema::{categories, transactions};

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }

    fn join_category(row: (TransactionDb, Option<CategoryDb>)) -> TransactionWithCategory {
        let (transaction, category) = row;
        TransactionWithCategory {
            transaction: Transaction::from(transaction),
            category: category.map(Into::into),
        }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .left_join(categories::table)
            .filter(transactions::user_id.eq(user_id))
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .select((
                TransactionDb::as_select(),
                Option::<CategoryDb>::as_select(),
            ))
            .load::<(TransactionDb, Option<CategoryDb>)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Self::join_category).collect())
    }

    fn get_by_id(&self, id: &str, user_id: &str) -> Result<Option<TransactionWithCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .left_join(categories::table)
            .filter(transactions::id.eq(id))
            .filter(transactions::user_id.eq(user_id))
            .select((
                TransactionDb::as_select(),
                Option::<CategoryDb>::as_select(),
            ))
            .first::<(TransactionDb, Option<CategoryDb>)>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Self::join_category))
    }

    fn expense_amounts_in_window(
        &self,
        user_id: &str,
        category_id: &str,
        from: NaiveDate,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Decimal>> {
        let mut conn = get_connection(&self.pool)?;

        // ISO dates compare correctly as text.
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::category_id.eq(category_id))
            .filter(transactions::kind.eq("expense"))
            .filter(transactions::date.ge(from.format("%Y-%m-%d").to_string()))
            .into_boxed();
        if let Some(until) = until {
            query = query.filter(transactions::date.le(until.format("%Y-%m-%d").to_string()));
        }

        let amounts: Vec<String> = query
            .select(transactions::amount)
            .load(&mut conn)
            .map_err(StorageError::from)?;
        Ok(amounts
            .iter()
            .map(|a| parse_decimal(a, "amount"))
            .collect())
    }

    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let now = Utc::now().to_rfc3339();
                let row = NewTransactionDb {
                    id: Uuid::new_v4().to_string(),
                    user_id: user_id_owned,
                    category_id: new_transaction.category_id,
                    amount: new_transaction.amount.to_string(),
                    description: new_transaction.description,
                    date: new_transaction.date.format("%Y-%m-%d").to_string(),
                    kind: new_transaction.kind.as_str().to_string(),
                    payment_method: new_transaction.payment_method,
                    tags: encode_tags(&new_transaction.tags),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let created = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDb::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(created))
            })
            .await
    }

    async fn update(
        &self,
        id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let id_owned = id.to_string();
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let changeset = TransactionChangesetDb {
                    category_id: update.category_id,
                    amount: update.amount.map(|a| a.to_string()),
                    description: update.description,
                    date: update.date.map(|d| d.format("%Y-%m-%d").to_string()),
                    kind: update.kind.map(|k| k.as_str().to_string()),
                    payment_method: update.payment_method,
                    tags: update.tags.as_deref().map(encode_tags),
                    updated_at: Utc::now().to_rfc3339(),
                };

                let updated = diesel::update(
                    transactions::table
                        .find(&id_owned)
                        .filter(transactions::user_id.eq(&user_id_owned)),
                )
                .set(&changeset)
                .returning(TransactionDb::as_returning())
                .get_result(conn)
                .map_err(StorageError::from)?;
                Ok(Transaction::from(updated))
            })
            .await
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    transactions::table
                        .find(&id_owned)
                        .filter(transactions::user_id.eq(&user_id_owned)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
