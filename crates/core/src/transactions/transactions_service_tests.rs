#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result};
    use crate::transactions::{
        NewTransaction, Transaction, TransactionKind, TransactionRepositoryTrait,
        TransactionService, TransactionServiceTrait, TransactionUpdate, TransactionWithCategory,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    const USER: &str = "user-1";

    #[derive(Clone, Default)]
    struct MockTransactionRepository {
        transactions: Arc<Mutex<Vec<Transaction>>>,
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockTransactionRepository {
        fn list_for_user(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>> {
            Ok(self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .map(|transaction| TransactionWithCategory {
                    transaction,
                    category: None,
                })
                .collect())
        }

        fn get_by_id(&self, id: &str, user_id: &str) -> Result<Option<TransactionWithCategory>> {
            Ok(self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == id && t.user_id == user_id)
                .cloned()
                .map(|transaction| TransactionWithCategory {
                    transaction,
                    category: None,
                }))
        }

        fn expense_amounts_in_window(
            &self,
            _user_id: &str,
            _category_id: &str,
            _from: NaiveDate,
            _until: Option<NaiveDate>,
        ) -> Result<Vec<Decimal>> {
            unimplemented!()
        }

        async fn create(&self, user_id: &str, new: NewTransaction) -> Result<Transaction> {
            let transaction = Transaction {
                id: format!("txn-{}", self.transactions.lock().unwrap().len() + 1),
                user_id: user_id.to_string(),
                category_id: new.category_id,
                amount: new.amount,
                description: new.description,
                date: new.date,
                kind: new.kind,
                payment_method: new.payment_method,
                tags: new.tags,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            };
            self.transactions.lock().unwrap().push(transaction.clone());
            Ok(transaction)
        }

        async fn update(
            &self,
            id: &str,
            user_id: &str,
            update: TransactionUpdate,
        ) -> Result<Transaction> {
            let mut transactions = self.transactions.lock().unwrap();
            let transaction = transactions
                .iter_mut()
                .find(|t| t.id == id && t.user_id == user_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!("Transaction {}", id)))
                })?;
            if let Some(amount) = update.amount {
                transaction.amount = amount;
            }
            if let Some(description) = update.description {
                transaction.description = description;
            }
            Ok(transaction.clone())
        }

        async fn delete(&self, id: &str, user_id: &str) -> Result<usize> {
            let mut transactions = self.transactions.lock().unwrap();
            let before = transactions.len();
            transactions.retain(|t| !(t.id == id && t.user_id == user_id));
            Ok(before - transactions.len())
        }
    }

    fn new_transaction(description: &str) -> NewTransaction {
        NewTransaction {
            category_id: None,
            amount: dec!(12.50),
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            kind: TransactionKind::Expense,
            payment_method: None,
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn create_round_trips_through_the_repository() {
        let service = TransactionService::new(Arc::new(MockTransactionRepository::default()));
        let created = service
            .create_transaction(USER, new_transaction("Coffee"))
            .await
            .unwrap();
        assert_eq!(created.transaction.description, "Coffee");
        assert_eq!(created.transaction.user_id, USER);
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let service = TransactionService::new(Arc::new(MockTransactionRepository::default()));
        let result = service.create_transaction(USER, new_transaction("  ")).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn foreign_rows_are_invisible() {
        let repo = MockTransactionRepository::default();
        let service = TransactionService::new(Arc::new(repo.clone()));
        let created = service
            .create_transaction(USER, new_transaction("Mine"))
            .await
            .unwrap();

        assert!(service
            .get_transaction(&created.transaction.id, "user-2")
            .unwrap()
            .is_none());
        assert_eq!(
            service
                .delete_transaction(&created.transaction.id, "user-2")
                .await
                .unwrap(),
            0
        );
    }
}
