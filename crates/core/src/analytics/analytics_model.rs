//! Analytics domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lookback window selector for the analytics summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LookbackPeriod {
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl LookbackPeriod {
    /// Fixed day count for the window. This is both the filter length and
    /// the divisor for average daily spend - deliberately not the number of
    /// distinct days that actually have transactions.
    pub fn days(&self) -> i64 {
        match self {
            LookbackPeriod::OneMonth => 30,
            LookbackPeriod::ThreeMonths => 90,
            LookbackPeriod::SixMonths => 180,
            LookbackPeriod::OneYear => 365,
        }
    }
}

/// Total expense for one category over the selected window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub name: String,
    pub total: Decimal,
    pub color: String,
}

/// Signed income sum vs absolute expense sum, independent of category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeExpenseTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

/// The category with the highest summed expense in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCategory {
    pub name: String,
    pub amount: Decimal,
}

/// Derived headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_category: Option<TopCategory>,
    pub avg_daily_spend: Decimal,
    pub net_saved: Decimal,
    /// Net saved over income; 0 when there is no income in the window.
    pub savings_rate: Decimal,
}

/// Everything the analytics view needs for one window, computed fresh on
/// every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub period: LookbackPeriod,
    pub category_totals: Vec<CategoryTotal>,
    pub totals: IncomeExpenseTotals,
    pub monthly: Vec<MonthlyTotals>,
    pub insights: Insights,
}
