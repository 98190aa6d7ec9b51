use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionUpdate, TransactionWithCategory,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// All transactions for one user with the category joined in, ordered by
    /// date descending, then creation time descending.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>>;

    /// One transaction by ID, scoped to the owning user.
    fn get_by_id(&self, id: &str, user_id: &str) -> Result<Option<TransactionWithCategory>>;

    /// Amounts of expense transactions for one user and category with
    /// `from <= date` (and `date <= until` when an upper bound is given).
    fn expense_amounts_in_window(
        &self,
        user_id: &str,
        category_id: &str,
        from: NaiveDate,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Decimal>>;

    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update(
        &self,
        id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Delete a transaction, returning the number of rows removed.
    async fn delete(&self, id: &str, user_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>>;

    fn get_transaction(&self, id: &str, user_id: &str) -> Result<Option<TransactionWithCategory>>;

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<TransactionWithCategory>;

    async fn update_transaction(
        &self,
        id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<TransactionWithCategory>;

    async fn delete_transaction(&self, id: &str, user_id: &str) -> Result<usize>;
}
