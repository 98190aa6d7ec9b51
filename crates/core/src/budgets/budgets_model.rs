//! Budget domain models and period-window arithmetic.

use crate::constants::WEEKLY_WINDOW_DAYS;
use crate::errors::ValidationError;
use crate::transactions::CategoryRef;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recurrence of a budget's spending target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    /// The window of transaction dates that count toward "spent" as of
    /// `today`.
    ///
    /// The lower bound is inclusive: weekly reaches back exactly
    /// [`WEEKLY_WINDOW_DAYS`] days, monthly and yearly snap to the first day
    /// of the current calendar month/year. Without `cap_at_today` there is
    /// no upper bound, so future-dated transactions are counted.
    pub fn window(&self, today: NaiveDate, cap_at_today: bool) -> PeriodWindow {
        let from = match self {
            BudgetPeriod::Weekly => today - Duration::days(WEEKLY_WINDOW_DAYS),
            BudgetPeriod::Monthly => today.with_day(1).unwrap_or(today),
            BudgetPeriod::Yearly => {
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
            }
        };
        PeriodWindow {
            from,
            until: cap_at_today.then_some(today),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(ValidationError::InvalidInput(format!(
                "Period must be weekly, monthly, or yearly, got '{}'",
                other
            ))),
        }
    }
}

/// Date range a budget period covers relative to a reference date.
/// Both bounds are inclusive; `until = None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub from: NaiveDate,
    pub until: Option<NaiveDate>,
}

/// A spending target for one category over a recurring period.
///
/// At most one budget exists per (user, category, period). The amount spent
/// against a budget is never stored; see
/// [`BudgetServiceTrait::compute_spent`](crate::budgets::BudgetServiceTrait).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A budget joined with its category, as loaded by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetWithCategory {
    pub budget: Budget,
    pub category: Option<CategoryRef>,
}

/// A budget with its category and the freshly computed spent amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithSpent {
    #[serde(flatten)]
    pub budget: Budget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    pub spent: Decimal,
}

fn default_period() -> BudgetPeriod {
    BudgetPeriod::Monthly
}

/// Input model for creating a new budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category_id: String,
    pub amount: Decimal,
    #[serde(default = "default_period")]
    pub period: BudgetPeriod,
}

/// Partial update for a budget. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub category_id: Option<String>,
    pub amount: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
}
