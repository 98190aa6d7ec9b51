use std::sync::Mutex;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use pennywise_server::{api::app_router, build_state, Config};
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;

// Config is env-driven; serialize the set-then-read window across tests.
static ENV_LOCK: Mutex<()> = Mutex::new(());

async fn build_test_router() -> (axum::Router, tempfile::TempDir) {
    let tmp = tempdir().unwrap();
    let state = {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(
            "PW_DB_PATH",
            tmp.path().join("test.db").to_str().unwrap().to_string(),
        );
        std::env::set_var("PW_JWT_SECRET", "integration-test-secret");
        let config = Config::from_env();
        build_state(&config).await.unwrap()
    };
    (app_router(state), tmp)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &axum::Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            None,
            json!({ "username": username, "password": "super-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_and_access_protected_routes() {
    let (app, _tmp) = build_test_router().await;

    // Unauthorized request fails.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let _ = register(&app, "sam").await;

    // Login with the right password.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            None,
            json!({ "username": "sam", "password": "super-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    // Wrong password is rejected with an unspecific message.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            None,
            json!({ "username": "sam", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The token opens protected routes.
    let response = app
        .clone()
        .oneshot(get_authed("/api/v1/transactions", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Seeded global categories are visible.
    let response = app
        .clone()
        .oneshot(get_authed("/api/v1/categories", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let categories = body_json(response).await;
    assert!(!categories.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn budget_rollup_over_the_api() {
    let (app, _tmp) = build_test_router().await;
    let token = register(&app, "pat").await;

    // Find a seeded expense category to budget against.
    let response = app
        .clone()
        .oneshot(get_authed("/api/v1/categories?type=expense", &token))
        .await
        .unwrap();
    let categories = body_json(response).await;
    let category_id = categories[0]["id"].as_str().unwrap().to_string();

    let today = chrono::Utc::now().date_naive();
    for amount in [120, 80] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/transactions",
                Some(&token),
                json!({
                    "categoryId": category_id,
                    "amount": amount,
                    "description": "groceries",
                    "date": today.format("%Y-%m-%d").to_string(),
                    "type": "expense",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/budgets",
            Some(&token),
            json!({ "categoryId": category_id, "amount": 500, "period": "monthly" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["spent"], json!(200.0));

    // A second monthly budget for the same category is rejected.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/budgets",
            Some(&token),
            json!({ "categoryId": category_id, "amount": 300, "period": "monthly" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A weekly budget for the same category is fine.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/budgets",
            Some(&token),
            json!({ "categoryId": category_id, "amount": 100, "period": "weekly" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The list recomputes spent on every read.
    let response = app
        .clone()
        .oneshot(get_authed("/api/v1/budgets", &token))
        .await
        .unwrap();
    let budgets = body_json(response).await;
    assert_eq!(budgets.as_array().unwrap().len(), 2);

    // Another user cannot see these budgets.
    let other_token = register(&app, "alex").await;
    let budget_id = budgets[0]["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(get_authed(
            &format!("/api/v1/budgets/{budget_id}"),
            &other_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_summary_over_the_api() {
    let (app, _tmp) = build_test_router().await;
    let token = register(&app, "kim").await;

    let today = chrono::Utc::now().date_naive();
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/transactions",
            Some(&token),
            json!({
                "amount": 1000,
                "description": "paycheck",
                "date": today.format("%Y-%m-%d").to_string(),
                "type": "income",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_authed(
            "/api/v1/analytics/summary?period=oneMonth",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["totals"]["income"], json!(1000.0));
    assert_eq!(summary["insights"]["savingsRate"], json!(1.0));
}
