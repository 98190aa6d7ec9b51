use crate::categories::categories_model::{Category, CategoryKind, CategoryUpdate, NewCategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Result, ValidationError};
use async_trait::async_trait;
use std::sync::Arc;

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { category_repo }
    }

    fn validate_new(new_category: &NewCategory) -> Result<()> {
        if new_category.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if new_category.color.trim().is_empty() {
            return Err(ValidationError::MissingField("color".to_string()).into());
        }
        if new_category.icon.trim().is_empty() {
            return Err(ValidationError::MissingField("icon".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn list_categories(&self, user_id: &str, kind: Option<CategoryKind>) -> Result<Vec<Category>> {
        match kind {
            Some(kind) => self.category_repo.list_visible_by_kind(user_id, kind),
            None => self.category_repo.list_visible(user_id),
        }
    }

    fn get_category(&self, id: &str, user_id: &str) -> Result<Option<Category>> {
        self.category_repo.get_visible(id, user_id)
    }

    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        Self::validate_new(&new_category)?;
        self.category_repo.create(user_id, new_category).await
    }

    async fn update_category(
        &self,
        id: &str,
        user_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name".to_string()).into());
            }
        }
        self.category_repo.update(id, user_id, update).await
    }
}
