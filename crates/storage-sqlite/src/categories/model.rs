//! Database models for categories.

use diesel::prelude::*;
use pennywise_core::categories::{Category, CategoryKind};
use pennywise_core::transactions::CategoryRef;
use std::str::FromStr;

use crate::parsing::parse_timestamp;

/// Database model for categories
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDb {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub kind: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for creating a new category
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategoryDb {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub kind: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for partial category updates. `None` fields are skipped.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChangesetDb {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub kind: Option<String>,
    pub updated_at: String,
}

fn parse_kind(value: &str) -> CategoryKind {
    CategoryKind::from_str(value).unwrap_or_else(|e| {
        log::error!("Unexpected category kind '{}': {}", value, e);
        CategoryKind::Expense
    })
}

impl From<CategoryDb> for Category {
    fn from(db: CategoryDb) -> Self {
        Self {
            kind: parse_kind(&db.kind),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            color: db.color,
            icon: db.icon,
        }
    }
}

impl From<CategoryDb> for CategoryRef {
    fn from(db: CategoryDb) -> Self {
        Self {
            kind: parse_kind(&db.kind),
            id: db.id,
            name: db.name,
            color: db.color,
            icon: db.icon,
        }
    }
}
