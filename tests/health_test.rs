//! 헬스체크 및 공통 미들웨어 통합 테스트

mod common;

use axum::http::{Method, StatusCode};

use common::{body_json, spawn_app};

#[tokio::test]
async fn should_report_healthy_database() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.public(Method::GET, "/health", None).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = body_json(response).await;
    assert_eq!(body["checks"]["database"]["status"], true);
    assert_ne!(body["status"], "unhealthy");
}

#[tokio::test]
async fn should_return_common_404_for_unknown_path() {
    let app = spawn_app().await;

    let response = app.public(Method::GET, "/api/v1/unknown", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], false);
    assert_eq!(body["code"], "COMMON404");
}

#[tokio::test]
async fn should_serve_openapi_document() {
    let app = spawn_app().await;

    let response = app.public(Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/v1/surveys/{surveyId}/statistics"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
