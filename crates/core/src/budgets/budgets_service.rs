use crate::budgets::budgets_model::{
    BudgetPeriod, BudgetUpdate, BudgetWithCategory, BudgetWithSpent, NewBudget,
};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::transactions::TransactionRepositoryTrait;
use async_trait::async_trait;
use chrono::NaiveDate;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct BudgetService {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    /// When set, the rollup window stops at the reference date instead of
    /// being open-ended, so future-dated transactions stop counting.
    cap_at_today: bool,
}

impl BudgetService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        BudgetService {
            budget_repo,
            transaction_repo,
            cap_at_today: false,
        }
    }

    pub fn with_capped_window(mut self) -> Self {
        self.cap_at_today = true;
        self
    }

    fn validate_amount(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Valid amount is required".to_string(),
            )
            .into());
        }
        Ok(())
    }

    fn with_spent(&self, row: BudgetWithCategory, as_of: NaiveDate) -> Result<BudgetWithSpent> {
        let spent = self.compute_spent(
            &row.budget.user_id,
            &row.budget.category_id,
            row.budget.period,
            as_of,
        )?;
        Ok(BudgetWithSpent {
            budget: row.budget,
            category: row.category,
            spent,
        })
    }

    /// Rejects a (category, period) pair that already has a budget,
    /// ignoring `exclude_id` when updating that budget itself.
    fn check_duplicate(
        &self,
        user_id: &str,
        category_id: &str,
        period: BudgetPeriod,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        let existing = self.budget_repo.list_for_category(category_id, user_id)?;
        let conflict = existing.iter().any(|row| {
            row.budget.period == period && Some(row.budget.id.as_str()) != exclude_id
        });
        if conflict {
            return Err(ValidationError::InvalidInput(format!(
                "A {} budget already exists for this category",
                period
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: &str, as_of: NaiveDate) -> Result<Vec<BudgetWithSpent>> {
        self.budget_repo
            .list_for_user(user_id)?
            .into_iter()
            .map(|row| self.with_spent(row, as_of))
            .collect()
    }

    fn get_budget(
        &self,
        id: &str,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Option<BudgetWithSpent>> {
        match self.budget_repo.get_by_id(id, user_id)? {
            Some(row) => Ok(Some(self.with_spent(row, as_of)?)),
            None => Ok(None),
        }
    }

    fn get_budgets_for_category(
        &self,
        category_id: &str,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<BudgetWithSpent>> {
        self.budget_repo
            .list_for_category(category_id, user_id)?
            .into_iter()
            .map(|row| self.with_spent(row, as_of))
            .collect()
    }

    fn compute_spent(
        &self,
        user_id: &str,
        category_id: &str,
        period: BudgetPeriod,
        as_of: NaiveDate,
    ) -> Result<Decimal> {
        let window = period.window(as_of, self.cap_at_today);
        let amounts = self.transaction_repo.expense_amounts_in_window(
            user_id,
            category_id,
            window.from,
            window.until,
        )?;
        Ok(amounts.iter().fold(Decimal::zero(), |acc, a| acc + a.abs()))
    }

    async fn create_budget(
        &self,
        user_id: &str,
        new_budget: NewBudget,
        as_of: NaiveDate,
    ) -> Result<BudgetWithSpent> {
        Self::validate_amount(new_budget.amount)?;
        self.check_duplicate(user_id, &new_budget.category_id, new_budget.period, None)?;

        let created = self.budget_repo.create(user_id, new_budget).await?;
        let row = self
            .budget_repo
            .get_by_id(&created.id, user_id)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Budget {} not found after insert",
                    created.id
                )))
            })?;
        self.with_spent(row, as_of)
    }

    async fn update_budget(
        &self,
        id: &str,
        user_id: &str,
        update: BudgetUpdate,
        as_of: NaiveDate,
    ) -> Result<BudgetWithSpent> {
        if let Some(amount) = update.amount {
            Self::validate_amount(amount)?;
        }

        let current = self
            .budget_repo
            .get_by_id(id, user_id)?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("Budget {}", id))))?;

        // The effective pair after the update must still be unique.
        let category_id = update
            .category_id
            .clone()
            .unwrap_or_else(|| current.budget.category_id.clone());
        let period = update.period.unwrap_or(current.budget.period);
        self.check_duplicate(user_id, &category_id, period, Some(id))?;

        let updated = self.budget_repo.update(id, user_id, update).await?;
        let row = self
            .budget_repo
            .get_by_id(&updated.id, user_id)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Budget {} not found after update",
                    updated.id
                )))
            })?;
        self.with_spent(row, as_of)
    }

    async fn delete_budget(&self, id: &str, user_id: &str) -> Result<usize> {
        self.budget_repo.delete(id, user_id).await
    }
}
