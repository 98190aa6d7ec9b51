//! Database models for budgets.

use diesel::prelude::*;
use pennywise_core::budgets::{Budget, BudgetPeriod};
use std::str::FromStr;

use crate::parsing::{parse_decimal, parse_timestamp};

/// Database model for budgets
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDb {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: String,
    pub period: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for creating a new budget
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudgetDb {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: String,
    pub period: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for partial budget updates. `None` fields are skipped.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct BudgetChangesetDb {
    pub category_id: Option<String>,
    pub amount: Option<String>,
    pub period: Option<String>,
    pub updated_at: String,
}

impl From<BudgetDb> for Budget {
    fn from(db: BudgetDb) -> Self {
        Self {
            amount: parse_decimal(&db.amount, "amount"),
            period: BudgetPeriod::from_str(&db.period).unwrap_or_else(|e| {
                log::error!("Unexpected budget period '{}': {}", db.period, e);
                BudgetPeriod::Monthly
            }),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
        }
    }
}
