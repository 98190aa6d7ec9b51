use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;

use pennywise_core::budgets::{BudgetUpdate, BudgetWithSpent, NewBudget};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

// The rollup window is anchored at the request date; services never read
// the clock themselves.

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<BudgetWithSpent>>> {
    let budgets = state
        .budget_service
        .get_budgets(&current.id, Utc::now().date_naive())?;
    Ok(Json(budgets))
}

async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<BudgetWithSpent>> {
    let budget = state
        .budget_service
        .get_budget(&id, &current.id, Utc::now().date_naive())?
        .ok_or_else(|| ApiError::not_found("Budget not found"))?;
    Ok(Json(budget))
}

async fn get_budgets_for_category(
    Path(category_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<BudgetWithSpent>>> {
    let budgets = state.budget_service.get_budgets_for_category(
        &category_id,
        &current.id,
        Utc::now().date_naive(),
    )?;
    Ok(Json(budgets))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(new_budget): Json<NewBudget>,
) -> ApiResult<(StatusCode, Json<BudgetWithSpent>)> {
    let created = state
        .budget_service
        .create_budget(&current.id, new_budget, Utc::now().date_naive())
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(update): Json<BudgetUpdate>,
) -> ApiResult<Json<BudgetWithSpent>> {
    let updated = state
        .budget_service
        .update_budget(&id, &current.id, update, Utc::now().date_naive())
        .await?;
    Ok(Json(updated))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    let deleted = state.budget_service.delete_budget(&id, &current.id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Budget not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route(
            "/budgets/category/{categoryId}",
            get(get_budgets_for_category),
        )
}
