//! Analytics module - in-memory aggregation over a user's transactions.

mod analytics_model;
mod analytics_service;

#[cfg(test)]
mod analytics_service_tests;

pub use analytics_model::{
    AnalyticsSummary, CategoryTotal, IncomeExpenseTotals, Insights, LookbackPeriod, MonthlyTotals,
    TopCategory,
};
pub use analytics_service::{
    aggregate_by_category, aggregate_monthly, compute_insights, income_expense_totals,
    AnalyticsService, AnalyticsServiceTrait,
};
