use crate::budgets::budgets_model::{
    Budget, BudgetPeriod, BudgetUpdate, BudgetWithCategory, BudgetWithSpent, NewBudget,
};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// All budgets for one user with the category joined in, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<BudgetWithCategory>>;

    /// One budget by ID, scoped to the owning user.
    fn get_by_id(&self, id: &str, user_id: &str) -> Result<Option<BudgetWithCategory>>;

    /// All budgets for one category, scoped to the owning user.
    fn list_for_category(&self, category_id: &str, user_id: &str)
        -> Result<Vec<BudgetWithCategory>>;

    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;

    async fn update(&self, id: &str, user_id: &str, update: BudgetUpdate) -> Result<Budget>;

    /// Delete a budget, returning the number of rows removed.
    async fn delete(&self, id: &str, user_id: &str) -> Result<usize>;
}

/// Trait for budget service operations.
///
/// Every read recomputes `spent` from the transaction set as of the given
/// reference date; there is no cached aggregate. Callers pass "today"
/// explicitly so the window arithmetic never reads the process clock.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str, as_of: NaiveDate) -> Result<Vec<BudgetWithSpent>>;

    fn get_budget(&self, id: &str, user_id: &str, as_of: NaiveDate)
        -> Result<Option<BudgetWithSpent>>;

    fn get_budgets_for_category(
        &self,
        category_id: &str,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<BudgetWithSpent>>;

    /// Sum of `abs(amount)` over expense transactions for the user and
    /// category inside the period window anchored at `as_of`.
    fn compute_spent(
        &self,
        user_id: &str,
        category_id: &str,
        period: BudgetPeriod,
        as_of: NaiveDate,
    ) -> Result<Decimal>;

    async fn create_budget(
        &self,
        user_id: &str,
        new_budget: NewBudget,
        as_of: NaiveDate,
    ) -> Result<BudgetWithSpent>;

    async fn update_budget(
        &self,
        id: &str,
        user_id: &str,
        update: BudgetUpdate,
        as_of: NaiveDate,
    ) -> Result<BudgetWithSpent>;

    async fn delete_budget(&self, id: &str, user_id: &str) -> Result<usize>;
}
