use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use pennywise_core::analytics::{AnalyticsService, AnalyticsServiceTrait};
use pennywise_core::budgets::{BudgetService, BudgetServiceTrait};
use pennywise_core::categories::{CategoryService, CategoryServiceTrait};
use pennywise_core::transactions::{TransactionService, TransactionServiceTrait};
use pennywise_core::users::{UserService, UserServiceTrait};
use pennywise_storage_sqlite::budgets::BudgetRepository;
use pennywise_storage_sqlite::categories::CategoryRepository;
use pennywise_storage_sqlite::db::{self, write_actor};
use pennywise_storage_sqlite::transactions::TransactionRepository;
use pennywise_storage_sqlite::users::UserRepository;

use crate::auth::AuthManager;
use crate::config::Config;

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub analytics_service: Arc<dyn AnalyticsServiceTrait>,
    pub auth: AuthManager,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("PW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repo));

    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let category_service = Arc::new(CategoryService::new(category_repo));

    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo.clone()));

    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let budget_service = Arc::new(BudgetService::new(budget_repo, transaction_repo.clone()));

    let analytics_service = Arc::new(AnalyticsService::new(transaction_repo));

    let auth = AuthManager::new(&config.jwt_secret, config.token_ttl_hours);

    Ok(Arc::new(AppState {
        user_service,
        category_service,
        transaction_service,
        budget_service,
        analytics_service,
        auth,
        db_path,
    }))
}
