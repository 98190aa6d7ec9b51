//! Database models for transactions.
//!
//! Amounts are stored as decimal strings and tags as a JSON array in a Text
//! column (SQLite has no native array type).

use diesel::prelude::*;
use pennywise_core::transactions::{Transaction, TransactionKind};
use std::str::FromStr;

use crate::parsing::{parse_date, parse_decimal, parse_timestamp};

/// Database model for transactions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDb {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: String,
    pub description: String,
    pub date: String,
    pub kind: String,
    pub payment_method: Option<String>,
    pub tags: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for creating a new transaction
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDb {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: String,
    pub description: String,
    pub date: String,
    pub kind: String,
    pub payment_method: Option<String>,
    pub tags: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for partial transaction updates. `None` fields are skipped.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionChangesetDb {
    pub category_id: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub kind: Option<String>,
    pub payment_method: Option<String>,
    pub tags: Option<String>,
    pub updated_at: String,
}

pub(crate) fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

fn decode_tags(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("Failed to parse tags '{}': {}", raw, e);
        Vec::new()
    })
}

impl From<TransactionDb> for Transaction {
    fn from(db: TransactionDb) -> Self {
        Self {
            amount: parse_decimal(&db.amount, "amount"),
            date: parse_date(&db.date, "date"),
            kind: TransactionKind::from_str(&db.kind).unwrap_or_else(|e| {
                log::error!("Unexpected transaction kind '{}': {}", db.kind, e);
                TransactionKind::Expense
            }),
            tags: decode_tags(&db.tags),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            description: db.description,
            payment_method: db.payment_method,
        }
    }
}
