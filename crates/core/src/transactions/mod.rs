//! Transactions module - domain models, services, and traits.

mod csv;
mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_service_tests;

pub use csv::{parse_transactions_csv, write_transactions_csv, CsvRow, ParsedCsv};
pub use transactions_model::{
    CategoryRef, NewTransaction, Transaction, TransactionKind, TransactionUpdate,
    TransactionWithCategory,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
