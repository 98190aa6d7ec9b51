//! Pure aggregation functions plus the service wiring them to storage.
//!
//! Everything here is a single synchronous pass over a transaction list that
//! is already in memory; nothing is cached or memoized.

use crate::analytics::analytics_model::{
    AnalyticsSummary, CategoryTotal, IncomeExpenseTotals, Insights, LookbackPeriod, MonthlyTotals,
    TopCategory,
};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, RATIO_DECIMAL_PRECISION};
use crate::errors::Result;
use crate::transactions::{TransactionKind, TransactionRepositoryTrait, TransactionWithCategory};
use chrono::{Datelike, Duration, NaiveDate};
use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Group expense transactions by category name, summing absolute amounts.
///
/// Income transactions and transactions without a category are excluded, and
/// categories with no expense in the input are simply absent (never
/// zero-filled). Entries keep first-encountered order.
pub fn aggregate_by_category(transactions: &[TransactionWithCategory]) -> Vec<CategoryTotal> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for t in transactions {
        if t.transaction.kind != TransactionKind::Expense {
            continue;
        }
        let Some(category) = &t.category else {
            continue;
        };
        match index.get(&category.name) {
            Some(&i) => totals[i].total += t.transaction.amount.abs(),
            None => {
                index.insert(category.name.clone(), totals.len());
                totals.push(CategoryTotal {
                    name: category.name.clone(),
                    total: t.transaction.amount.abs(),
                    color: category.color.clone(),
                });
            }
        }
    }

    totals
}

/// Sum of signed income amounts vs sum of absolute expense amounts.
pub fn income_expense_totals(transactions: &[TransactionWithCategory]) -> IncomeExpenseTotals {
    let mut income = Decimal::zero();
    let mut expense = Decimal::zero();
    for t in transactions {
        match t.transaction.kind {
            TransactionKind::Income => income += t.transaction.amount,
            TransactionKind::Expense => expense += t.transaction.amount.abs(),
        }
    }
    IncomeExpenseTotals { income, expense }
}

/// Bucket transactions by the (year, month) of their own calendar date and
/// sum income and expense separately per bucket.
///
/// Using the date's own fields avoids the off-by-one-day shifts that
/// timezone-converted instants produce at month boundaries. Buckets come
/// back in chronological (year, month) order, never lexical month order.
pub fn aggregate_monthly(transactions: &[TransactionWithCategory]) -> Vec<MonthlyTotals> {
    let mut buckets: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

    for t in transactions {
        let entry = buckets
            .entry((t.transaction.date.year(), t.transaction.date.month()))
            .or_insert((Decimal::zero(), Decimal::zero()));
        match t.transaction.kind {
            TransactionKind::Income => entry.0 += t.transaction.amount,
            TransactionKind::Expense => entry.1 += t.transaction.amount.abs(),
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyTotals {
            year,
            month,
            income,
            expense,
        })
        .collect()
}

/// Derive headline insights for a window of `window_days` days.
///
/// Average daily spend divides by the window constant, not by the number of
/// distinct days with transactions. On equal category totals the first
/// encountered category wins.
pub fn compute_insights(
    transactions: &[TransactionWithCategory],
    window_days: i64,
) -> Insights {
    let totals = income_expense_totals(transactions);

    let mut top_category: Option<TopCategory> = None;
    for c in aggregate_by_category(transactions) {
        let beats_current = match &top_category {
            Some(current) => c.total > current.amount,
            None => true,
        };
        if beats_current {
            top_category = Some(TopCategory {
                name: c.name,
                amount: c.total,
            });
        }
    }

    let days = Decimal::from(window_days.max(1));
    let net_saved = totals.income - totals.expense;
    let savings_rate = if totals.income.is_zero() {
        Decimal::zero()
    } else {
        (net_saved / totals.income).round_dp(RATIO_DECIMAL_PRECISION)
    };

    Insights {
        top_category,
        avg_daily_spend: (totals.expense / days).round_dp(DISPLAY_DECIMAL_PRECISION),
        net_saved,
        savings_rate,
    }
}

/// Trait defining the contract for the analytics service
pub trait AnalyticsServiceTrait: Send + Sync {
    /// Aggregate the user's transactions over the lookback window ending at
    /// `as_of` (both window bounds inclusive).
    fn get_summary(
        &self,
        user_id: &str,
        period: LookbackPeriod,
        as_of: NaiveDate,
    ) -> Result<AnalyticsSummary>;
}

pub struct AnalyticsService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl AnalyticsService {
    pub fn new(transaction_repo: Arc<dyn TransactionRepositoryTrait>) -> Self {
        AnalyticsService { transaction_repo }
    }
}

impl AnalyticsServiceTrait for AnalyticsService {
    fn get_summary(
        &self,
        user_id: &str,
        period: LookbackPeriod,
        as_of: NaiveDate,
    ) -> Result<AnalyticsSummary> {
        let start = as_of - Duration::days(period.days());
        let transactions: Vec<TransactionWithCategory> = self
            .transaction_repo
            .list_for_user(user_id)?
            .into_iter()
            .filter(|t| t.transaction.date >= start && t.transaction.date <= as_of)
            .collect();

        let insights = compute_insights(&transactions, period.days());

        Ok(AnalyticsSummary {
            period,
            category_totals: aggregate_by_category(&transactions),
            totals: income_expense_totals(&transactions),
            monthly: aggregate_monthly(&transactions),
            insights,
        })
    }
}
