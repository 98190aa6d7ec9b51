//! Budgets module - period windows, the spend rollup, and budget CRUD.

mod budgets_model;
mod budgets_service;
mod budgets_traits;


pub use budgets_model::{
    Budget, BudgetPeriod, BudgetUpdate, BudgetWithCategory, BudgetWithSpent, NewBudget,
    PeriodWindow,
};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
