#[cfg(test)]
mod tests {
    use crate::analytics::analytics_service::*;
    use crate::analytics::LookbackPeriod;
    use crate::categories::CategoryKind;
    use crate::errors::Result;
    use crate::transactions::{
        CategoryRef, NewTransaction, Transaction, TransactionKind, TransactionRepositoryTrait,
        TransactionUpdate, TransactionWithCategory,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(
        kind: TransactionKind,
        amount: Decimal,
        category: Option<&str>,
        on: NaiveDate,
    ) -> TransactionWithCategory {
        TransactionWithCategory {
            transaction: Transaction {
                id: format!("txn-{}-{}", amount, on),
                user_id: "user-1".to_string(),
                category_id: category.map(str::to_string),
                amount,
                description: "test".to_string(),
                date: on,
                kind,
                payment_method: None,
                tags: Vec::new(),
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
            category: category.map(|name| CategoryRef {
                id: format!("cat-{}", name),
                name: name.to_string(),
                color: "#8884d8".to_string(),
                icon: "tag".to_string(),
                kind: match kind {
                    TransactionKind::Income => CategoryKind::Income,
                    TransactionKind::Expense => CategoryKind::Expense,
                },
            }),
        }
    }

    #[test]
    fn category_totals_exclude_income_and_omit_empty_categories() {
        let transactions = vec![
            row(TransactionKind::Expense, dec!(50), Some("catA"), date(2025, 3, 1)),
            row(TransactionKind::Expense, dec!(30), Some("catA"), date(2025, 3, 2)),
            row(TransactionKind::Income, dec!(100), Some("catB"), date(2025, 3, 3)),
        ];

        let totals = aggregate_by_category(&transactions);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].name, "catA");
        assert_eq!(totals[0].total, dec!(80));
    }

    #[test]
    fn category_totals_skip_uncategorized_expenses() {
        let transactions = vec![
            row(TransactionKind::Expense, dec!(10), None, date(2025, 3, 1)),
            row(TransactionKind::Expense, dec!(20), Some("catA"), date(2025, 3, 2)),
        ];

        let totals = aggregate_by_category(&transactions);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, dec!(20));
    }

    #[test]
    fn income_and_expense_sum_independently_of_category() {
        let transactions = vec![
            row(TransactionKind::Income, dec!(1000), None, date(2025, 3, 1)),
            row(TransactionKind::Income, dec!(250), Some("catB"), date(2025, 3, 2)),
            row(TransactionKind::Expense, dec!(-75), Some("catA"), date(2025, 3, 3)),
            row(TransactionKind::Expense, dec!(25), None, date(2025, 3, 4)),
        ];

        let totals = income_expense_totals(&transactions);
        assert_eq!(totals.income, dec!(1250));
        assert_eq!(totals.expense, dec!(100));
    }

    #[test]
    fn monthly_buckets_are_ordered_chronologically_across_years() {
        // Dec 2024 must sort before Jan 2025 even though "Dec" > "Jan"
        // lexically.
        let transactions = vec![
            row(TransactionKind::Expense, dec!(10), Some("catA"), date(2025, 1, 15)),
            row(TransactionKind::Expense, dec!(20), Some("catA"), date(2024, 12, 20)),
            row(TransactionKind::Income, dec!(500), None, date(2024, 12, 5)),
        ];

        let monthly = aggregate_monthly(&transactions);
        assert_eq!(monthly.len(), 2);
        assert_eq!((monthly[0].year, monthly[0].month), (2024, 12));
        assert_eq!((monthly[1].year, monthly[1].month), (2025, 1));
        assert_eq!(monthly[0].income, dec!(500));
        assert_eq!(monthly[0].expense, dec!(20));
        assert_eq!(monthly[1].expense, dec!(10));
    }

    #[test]
    fn savings_rate_is_zero_when_there_is_no_income() {
        let transactions = vec![row(
            TransactionKind::Expense,
            dec!(40),
            Some("catA"),
            date(2025, 3, 1),
        )];

        let insights = compute_insights(&transactions, 30);
        assert_eq!(insights.savings_rate, Decimal::ZERO);
        assert_eq!(insights.net_saved, dec!(-40));
    }

    #[test]
    fn savings_rate_is_net_saved_over_income() {
        let transactions = vec![
            row(TransactionKind::Income, dec!(200), None, date(2025, 3, 1)),
            row(TransactionKind::Expense, dec!(50), Some("catA"), date(2025, 3, 2)),
        ];

        let insights = compute_insights(&transactions, 30);
        assert_eq!(insights.net_saved, dec!(150));
        assert_eq!(insights.savings_rate, dec!(0.75));
    }

    #[test]
    fn average_daily_spend_divides_by_the_window_constant() {
        // Two transactions on the same day still divide by the full window.
        let transactions = vec![
            row(TransactionKind::Expense, dec!(45), Some("catA"), date(2025, 3, 1)),
            row(TransactionKind::Expense, dec!(15), Some("catB"), date(2025, 3, 1)),
        ];

        let insights = compute_insights(&transactions, 30);
        assert_eq!(insights.avg_daily_spend, dec!(2));
    }

    #[test]
    fn top_category_tie_goes_to_the_first_encountered() {
        let transactions = vec![
            row(TransactionKind::Expense, dec!(60), Some("catA"), date(2025, 3, 1)),
            row(TransactionKind::Expense, dec!(60), Some("catB"), date(2025, 3, 2)),
        ];

        let insights = compute_insights(&transactions, 30);
        let top = insights.top_category.unwrap();
        assert_eq!(top.name, "catA");
        assert_eq!(top.amount, dec!(60));
    }

    #[test]
    fn insights_have_no_top_category_without_categorized_expenses() {
        let transactions = vec![row(TransactionKind::Income, dec!(100), None, date(2025, 3, 1))];

        let insights = compute_insights(&transactions, 30);
        assert!(insights.top_category.is_none());
    }

    // --- Mock repository for the service-level window filter ---
    #[derive(Clone, Default)]
    struct MockTransactionRepository {
        transactions: Arc<Mutex<Vec<TransactionWithCategory>>>,
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockTransactionRepository {
        fn list_for_user(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>> {
            Ok(self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.transaction.user_id == user_id)
                .cloned()
                .collect())
        }

        fn get_by_id(&self, _id: &str, _user_id: &str) -> Result<Option<TransactionWithCategory>> {
            unimplemented!()
        }

        fn expense_amounts_in_window(
            &self,
            _user_id: &str,
            _category_id: &str,
            _from: NaiveDate,
            _until: Option<NaiveDate>,
        ) -> Result<Vec<Decimal>> {
            unimplemented!()
        }

        async fn create(&self, _user_id: &str, _new: NewTransaction) -> Result<Transaction> {
            unimplemented!()
        }

        async fn update(
            &self,
            _id: &str,
            _user_id: &str,
            _update: TransactionUpdate,
        ) -> Result<Transaction> {
            unimplemented!()
        }

        async fn delete(&self, _id: &str, _user_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    #[test]
    fn summary_filters_to_the_lookback_window() {
        let repo = MockTransactionRepository::default();
        {
            let mut rows = repo.transactions.lock().unwrap();
            rows.push(row(TransactionKind::Expense, dec!(30), Some("catA"), date(2025, 3, 10)));
            // Outside the 30-day window.
            rows.push(row(TransactionKind::Expense, dec!(99), Some("catA"), date(2024, 11, 1)));
        }
        let service = AnalyticsService::new(Arc::new(repo));

        let summary = service
            .get_summary("user-1", LookbackPeriod::OneMonth, date(2025, 3, 15))
            .unwrap();
        assert_eq!(summary.totals.expense, dec!(30));
        assert_eq!(summary.category_totals.len(), 1);
        assert_eq!(summary.monthly.len(), 1);
    }

    #[test]
    fn summary_is_recomputed_identically_for_the_same_inputs() {
        let repo = MockTransactionRepository::default();
        repo.transactions.lock().unwrap().push(row(
            TransactionKind::Expense,
            dec!(12),
            Some("catA"),
            date(2025, 3, 10),
        ));
        let service = AnalyticsService::new(Arc::new(repo));

        let first = service
            .get_summary("user-1", LookbackPeriod::OneMonth, date(2025, 3, 15))
            .unwrap();
        let second = service
            .get_summary("user-1", LookbackPeriod::OneMonth, date(2025, 3, 15))
            .unwrap();
        assert_eq!(first, second);
    }
}
