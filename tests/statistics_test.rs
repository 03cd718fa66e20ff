//! 설문 통계 API 통합 테스트

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{at, bearer, body_json, cookie_pair, location, seed_response, seed_survey, spawn_app};

#[tokio::test]
async fn should_aggregate_submitted_ratings() {
    // Arrange
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "만족도", &["친절도", "청결도"]).await;
    app.submit(
        survey_id,
        json!({
            "answers": [
                { "questionId": q[0], "value": 5 },
                { "questionId": q[1], "value": 3 }
            ],
            "remarks": "ok"
        }),
    )
    .await;

    // Act
    let response = app
        .admin(
            Method::GET,
            &format!("/api/v1/surveys/{}/statistics", survey_id),
            None,
        )
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let result = &body["result"];
    assert_eq!(result["totalResponses"], 1);
    assert_eq!(result["questions"][0]["starCounts"][4]["value"], 5);
    assert_eq!(result["questions"][0]["starCounts"][4]["count"], 1);
    assert_eq!(result["questions"][0]["average"], 5.0);
    assert_eq!(result["questions"][1]["starCounts"][2]["count"], 1);
    assert_eq!(result["questions"][1]["average"], 3.0);
    assert_eq!(result["remarks"]["items"][0]["remarks"], "ok");
    assert_eq!(result["remarks"]["items"][0]["count"], 1);
}

#[tokio::test]
async fn should_return_null_average_when_no_answers() {
    let app = spawn_app().await;
    let (survey_id, _) = seed_survey(&app.db, "빈 설문", &["q1"]).await;

    let body = body_json(
        app.admin(
            Method::GET,
            &format!("/api/v1/surveys/{}/statistics", survey_id),
            None,
        )
        .await,
    )
    .await;

    assert_eq!(body["result"]["totalResponses"], 0);
    assert!(body["result"]["questions"][0]["average"].is_null());
    assert_eq!(body["result"]["remarks"]["page"], 1);
    assert_eq!(body["result"]["remarks"]["numPages"], 1);
    assert_eq!(body["result"]["remarks"]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn should_filter_by_inclusive_date_range() {
    // Arrange
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "만족도", &["q1"]).await;
    seed_response(&app.db, survey_id, &[(q[0], 1)], "이전", at("2024-02-29", "23:59:59")).await;
    seed_response(&app.db, survey_id, &[(q[0], 4)], "시작", at("2024-03-01", "00:00:00")).await;
    seed_response(&app.db, survey_id, &[(q[0], 2)], "종료", at("2024-03-31", "23:59:59")).await;
    seed_response(&app.db, survey_id, &[(q[0], 5)], "이후", at("2024-04-01", "00:00:00")).await;

    // Act
    let body = body_json(
        app.admin(
            Method::GET,
            &format!(
                "/api/v1/surveys/{}/statistics?start_date=2024-03-01&end_date=2024-03-31",
                survey_id
            ),
            None,
        )
        .await,
    )
    .await;

    // Assert
    let result = &body["result"];
    assert_eq!(result["startDate"], "2024-03-01");
    assert_eq!(result["endDate"], "2024-03-31");
    assert_eq!(result["totalResponses"], 2);
    assert_eq!(result["questions"][0]["totalAnswers"], 2);
    assert_eq!(result["questions"][0]["average"], 3.0);
    let remarks: Vec<&str> = result["remarks"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["remarks"].as_str().unwrap())
        .collect();
    assert_eq!(remarks, vec!["시작", "종료"]);
}

#[tokio::test]
async fn should_treat_empty_dates_as_unfiltered() {
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "만족도", &["q1"]).await;
    seed_response(&app.db, survey_id, &[(q[0], 3)], "", at("2020-01-01", "10:00:00")).await;

    let body = body_json(
        app.admin(
            Method::GET,
            &format!("/api/v1/surveys/{}/statistics?start_date=&end_date=", survey_id),
            None,
        )
        .await,
    )
    .await;

    assert_eq!(body["result"]["totalResponses"], 1);
    assert!(body["result"]["startDate"].is_null());
    // 빈 의견은 목록에 나오지 않음
    assert_eq!(body["result"]["remarks"]["totalCount"], 0);
}

#[tokio::test]
async fn should_paginate_remarks_five_per_page_in_time_order() {
    // Arrange
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "만족도", &["q1"]).await;
    // 입력 순서와 시간 순서를 다르게 저장
    for i in (1..=12).rev() {
        seed_response(
            &app.db,
            survey_id,
            &[(q[0], 4)],
            &format!("의견 {}", i),
            at("2024-05-01", &format!("{:02}:00:00", i)),
        )
        .await;
    }
    let uri = |page: &str| format!("/api/v1/surveys/{}/statistics?page={}", survey_id, page);

    // Act
    let first = body_json(app.admin(Method::GET, &uri("1"), None).await).await;
    let last = body_json(app.admin(Method::GET, &uri("3"), None).await).await;
    let invalid = body_json(app.admin(Method::GET, &uri("abc"), None).await).await;
    let beyond = body_json(app.admin(Method::GET, &uri("99"), None).await).await;
    let zero = body_json(app.admin(Method::GET, &uri("0"), None).await).await;
    let negative = body_json(app.admin(Method::GET, &uri("-2"), None).await).await;
    let huge = body_json(
        app.admin(Method::GET, &uri("99999999999999999999999"), None)
            .await,
    )
    .await;

    // Assert
    let texts = |body: &serde_json::Value| -> Vec<String> {
        body["result"]["remarks"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["remarks"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(
        texts(&first),
        vec!["의견 1", "의견 2", "의견 3", "의견 4", "의견 5"]
    );
    assert_eq!(first["result"]["remarks"]["hasNext"], true);
    assert_eq!(first["result"]["remarks"]["hasPrevious"], false);
    assert_eq!(first["result"]["remarks"]["numPages"], 3);
    assert_eq!(texts(&last), vec!["의견 11", "의견 12"]);
    assert_eq!(last["result"]["remarks"]["hasNext"], false);
    assert_eq!(invalid["result"]["remarks"]["page"], 1);
    assert_eq!(beyond["result"]["remarks"]["page"], 3);
    // 범위 밖 정수는 모두 마지막 페이지
    for body in [&zero, &negative, &huge] {
        assert_eq!(body["result"]["remarks"]["page"], 3);
        assert_eq!(texts(body), vec!["의견 11", "의견 12"]);
    }
}

#[tokio::test]
async fn should_redirect_back_with_error_on_invalid_date() {
    // Arrange
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "만족도", &["q1"]).await;
    seed_response(&app.db, survey_id, &[(q[0], 5)], "", at("2024-01-01", "10:00:00")).await;

    // Act
    let response = app
        .admin(
            Method::GET,
            &format!("/api/v1/surveys/{}/statistics?start_date=13-13-9999", survey_id),
            None,
        )
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/api/v1/surveys/{}/statistics", survey_id)
    );
    let cookie = cookie_pair(&response, "flash").expect("flash 쿠키 없음");

    let follow = app
        .send(
            Request::builder()
                .uri(location(&response))
                .header(header::AUTHORIZATION, bearer())
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let cleared = cookie_pair(&follow, "flash");
    let body = body_json(follow).await;
    assert_eq!(body["result"]["messages"][0]["level"], "error");
    assert_eq!(
        body["result"]["messages"][0]["message"],
        "날짜 형식이 올바르지 않습니다. (YYYY-MM-DD 형식 필요)"
    );
    assert_eq!(body["result"]["totalResponses"], 1);
    assert_eq!(body["result"]["survey"]["name"], "만족도");
    assert_eq!(cleared.as_deref(), Some("flash="));
}

#[tokio::test]
async fn should_redirect_unknown_survey_to_selection_keeping_query() {
    let app = spawn_app().await;

    let response = app
        .admin(
            Method::GET,
            "/api/v1/surveys/999/statistics?start_date=2024-01-01",
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/api/v1/surveys/selection?start_date=2024-01-01"
    );
    assert!(cookie_pair(&response, "flash").is_some());
}

#[tokio::test]
async fn should_require_admin_for_statistics() {
    let app = spawn_app().await;
    let (survey_id, _) = seed_survey(&app.db, "만족도", &["q1"]).await;

    let response = app
        .public(
            Method::GET,
            &format!("/api/v1/surveys/{}/statistics", survey_id),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
