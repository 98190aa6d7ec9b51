use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::tempdir;

use pennywise_core::budgets::{BudgetPeriod, BudgetRepositoryTrait, NewBudget};
use pennywise_core::categories::{CategoryKind, CategoryRepositoryTrait};
use pennywise_core::errors::{DatabaseError, Error};
use pennywise_core::transactions::{NewTransaction, TransactionKind, TransactionRepositoryTrait};
use pennywise_core::users::{NewUser, UserRepositoryTrait};
use pennywise_storage_sqlite::budgets::BudgetRepository;
use pennywise_storage_sqlite::categories::CategoryRepository;
use pennywise_storage_sqlite::db::{self, write_actor, DbPool};
use pennywise_storage_sqlite::transactions::TransactionRepository;
use pennywise_storage_sqlite::users::UserRepository;

struct Repos {
    users: UserRepository,
    categories: CategoryRepository,
    transactions: TransactionRepository,
    budgets: BudgetRepository,
}

fn setup(path: &str) -> (Arc<DbPool>, Repos) {
    let db_path = db::init(path).unwrap();
    let pool = db::create_pool(&db_path).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = write_actor::spawn_writer((*pool).clone());

    let repos = Repos {
        users: UserRepository::new(pool.clone(), writer.clone()),
        categories: CategoryRepository::new(pool.clone(), writer.clone()),
        transactions: TransactionRepository::new(pool.clone(), writer.clone()),
        budgets: BudgetRepository::new(pool.clone(), writer.clone()),
    };
    (pool, repos)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn create_user(repos: &Repos, username: &str) -> String {
    repos
        .users
        .create(NewUser {
            username: username.to_string(),
            email: None,
            password_hash: "$argon2id$stub".to_string(),
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn round_trip_through_every_repository() {
    let tmp = tempdir().unwrap();
    let (_pool, repos) = setup(tmp.path().join("test.db").to_str().unwrap());

    let user_id = create_user(&repos, "sam").await;
    assert!(repos.users.find_by_username("sam").unwrap().is_some());

    // Seeded global categories are visible to every user.
    let categories = repos.categories.list_visible(&user_id).unwrap();
    assert!(!categories.is_empty());
    let expense_category = categories
        .iter()
        .find(|c| c.kind == CategoryKind::Expense)
        .unwrap()
        .clone();

    let created = repos
        .transactions
        .create(
            &user_id,
            NewTransaction {
                category_id: Some(expense_category.id.clone()),
                amount: dec!(42.50),
                description: "Groceries".to_string(),
                date: date(2025, 3, 10),
                kind: TransactionKind::Expense,
                payment_method: Some("card".to_string()),
                tags: vec!["weekly".to_string()],
            },
        )
        .await
        .unwrap();
    assert_eq!(created.amount, dec!(42.50));
    assert_eq!(created.tags, vec!["weekly".to_string()]);

    // The list joins the category back in.
    let listed = repos.transactions.list_for_user(&user_id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].category.as_ref().unwrap().name,
        expense_category.name
    );

    // Foreign users see nothing.
    let other_id = create_user(&repos, "pat").await;
    assert!(repos.transactions.list_for_user(&other_id).unwrap().is_empty());
    assert!(repos
        .transactions
        .get_by_id(&created.id, &other_id)
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn expense_window_filters_by_date_kind_and_category() {
    let tmp = tempdir().unwrap();
    let (_pool, repos) = setup(tmp.path().join("test.db").to_str().unwrap());
    let user_id = create_user(&repos, "sam").await;
    let categories = repos.categories.list_visible(&user_id).unwrap();
    let category_id = categories
        .iter()
        .find(|c| c.kind == CategoryKind::Expense)
        .unwrap()
        .id
        .clone();

    let rows = [
        (dec!(120), date(2025, 3, 5), TransactionKind::Expense),
        (dec!(80), date(2025, 3, 12), TransactionKind::Expense),
        (dec!(999), date(2025, 2, 27), TransactionKind::Expense),
        (dec!(50), date(2025, 3, 6), TransactionKind::Income),
    ];
    for (amount, on, kind) in rows {
        repos
            .transactions
            .create(
                &user_id,
                NewTransaction {
                    category_id: Some(category_id.clone()),
                    amount,
                    description: "row".to_string(),
                    date: on,
                    kind,
                    payment_method: None,
                    tags: Vec::new(),
                },
            )
            .await
            .unwrap();
    }

    let amounts = repos
        .transactions
        .expense_amounts_in_window(&user_id, &category_id, date(2025, 3, 1), None)
        .unwrap();
    let total: rust_decimal::Decimal = amounts.iter().sum();
    assert_eq!(total, dec!(200));

    let capped = repos
        .transactions
        .expense_amounts_in_window(&user_id, &category_id, date(2025, 3, 1), Some(date(2025, 3, 5)))
        .unwrap();
    assert_eq!(capped, vec![dec!(120)]);
}

#[tokio::test]
async fn budget_unique_index_is_the_backstop_for_duplicates() {
    let tmp = tempdir().unwrap();
    let (_pool, repos) = setup(tmp.path().join("test.db").to_str().unwrap());
    let user_id = create_user(&repos, "sam").await;
    let categories = repos.categories.list_visible(&user_id).unwrap();
    let category_id = categories[0].id.clone();

    let new_budget = || NewBudget {
        category_id: category_id.clone(),
        amount: dec!(500),
        period: BudgetPeriod::Monthly,
    };

    repos.budgets.create(&user_id, new_budget()).await.unwrap();
    let result = repos.budgets.create(&user_id, new_budget()).await;
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::UniqueViolation(_)))
    ));

    // Same pair for a different user is fine.
    let other_id = create_user(&repos, "pat").await;
    assert!(repos.budgets.create(&other_id, new_budget()).await.is_ok());
}
