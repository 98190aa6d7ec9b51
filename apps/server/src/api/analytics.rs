use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde::Deserialize;

use pennywise_core::analytics::{AnalyticsSummary, LookbackPeriod};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
struct SummaryQuery {
    #[serde(default)]
    period: LookbackPeriod,
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<AnalyticsSummary>> {
    let summary = state.analytics_service.get_summary(
        &current.id,
        query.period,
        Utc::now().date_naive(),
    )?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/analytics/summary", get(get_summary))
}
