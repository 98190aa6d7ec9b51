use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::transactions::transactions_model::{
    NewTransaction, TransactionUpdate, TransactionWithCategory,
};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct TransactionService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(transaction_repo: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { transaction_repo }
    }

    fn validate_new(new_transaction: &NewTransaction) -> Result<()> {
        if new_transaction.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>> {
        self.transaction_repo.list_for_user(user_id)
    }

    fn get_transaction(&self, id: &str, user_id: &str) -> Result<Option<TransactionWithCategory>> {
        self.transaction_repo.get_by_id(id, user_id)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<TransactionWithCategory> {
        Self::validate_new(&new_transaction)?;
        let created = self
            .transaction_repo
            .create(user_id, new_transaction)
            .await?;
        // Re-read to pick up the joined category fields.
        self.transaction_repo
            .get_by_id(&created.id, user_id)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Transaction {} not found after insert",
                    created.id
                )))
            })
    }

    async fn update_transaction(
        &self,
        id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<TransactionWithCategory> {
        if let Some(description) = &update.description {
            if description.trim().is_empty() {
                return Err(ValidationError::MissingField("description".to_string()).into());
            }
        }
        let updated = self.transaction_repo.update(id, user_id, update).await?;
        self.transaction_repo
            .get_by_id(&updated.id, user_id)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Transaction {} not found after update",
                    updated.id
                )))
            })
    }

    async fn delete_transaction(&self, id: &str, user_id: &str) -> Result<usize> {
        self.transaction_repo.delete(id, user_id).await
    }
}
