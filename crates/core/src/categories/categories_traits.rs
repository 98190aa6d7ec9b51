use crate::categories::categories_model::{Category, CategoryKind, CategoryUpdate, NewCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Global categories plus those owned by `user_id`, ordered by kind then name.
    fn list_visible(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Same as [`list_visible`](Self::list_visible), restricted to one kind.
    fn list_visible_by_kind(&self, user_id: &str, kind: CategoryKind) -> Result<Vec<Category>>;

    /// Get a category by ID if it is global or owned by `user_id`.
    fn get_visible(&self, id: &str, user_id: &str) -> Result<Option<Category>>;

    /// Create a new category owned by `user_id`.
    async fn create(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;

    /// Update a category owned by `user_id`. Global and foreign rows are
    /// reported as not found.
    async fn update(&self, id: &str, user_id: &str, update: CategoryUpdate) -> Result<Category>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// All categories visible to the user, optionally filtered by kind.
    fn list_categories(&self, user_id: &str, kind: Option<CategoryKind>) -> Result<Vec<Category>>;

    /// Get a single visible category.
    fn get_category(&self, id: &str, user_id: &str) -> Result<Option<Category>>;

    /// Create a user-owned category.
    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;

    /// Update a user-owned category.
    async fn update_category(
        &self,
        id: &str,
        user_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;
}
