//! 부서/설문/질문 관리 API 통합 테스트

mod common;

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use common::{at, body_json, seed_response, seed_survey, spawn_app};
use survey_server::domain::survey::entity::{
    answer_choice, department, survey, survey_question, survey_response, survey_response_answer,
};

#[tokio::test]
async fn should_return_401_when_token_missing() {
    // Arrange
    let app = spawn_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/departments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "영업부" }).to_string()))
        .unwrap();

    // Act
    let response = app.send(request).await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], false);
    assert_eq!(body["code"], "AUTH4001");
    assert_eq!(department::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_return_401_for_token_signed_with_other_secret() {
    let app = spawn_app().await;
    let token = survey_server::utils::jwt::encode_token("admin".to_string(), "other", 60).unwrap();
    let request = Request::builder()
        .uri("/api/v1/departments")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_create_department_survey_and_question() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let dept = body_json(
        app.admin(Method::POST, "/api/v1/departments", Some(json!({ "name": "영업부" })))
            .await,
    )
    .await;
    let department_id = dept["result"]["departmentId"].as_i64().unwrap();

    let created = app
        .admin(
            Method::POST,
            "/api/v1/surveys",
            Some(json!({
                "name": "고객 만족도",
                "description": "2024 상반기",
                "departmentId": department_id
            })),
        )
        .await;
    assert_eq!(created.status(), StatusCode::OK);
    let created = body_json(created).await;
    let survey_id = created["result"]["surveyId"].as_i64().unwrap();

    let question = app
        .admin(
            Method::POST,
            &format!("/api/v1/surveys/{}/questions", survey_id),
            Some(json!({ "questionText": "직원이 친절했나요?" })),
        )
        .await;
    let question = body_json(question).await;

    // Assert
    assert_eq!(created["message"], "설문이 생성되었습니다.");
    assert_eq!(created["result"]["departmentName"], "영업부");
    assert_eq!(question["isSuccess"], true);
    assert_eq!(question["result"]["questionText"], "직원이 친절했나요?");

    let detail = body_json(
        app.admin(Method::GET, &format!("/api/v1/surveys/{}", survey_id), None)
            .await,
    )
    .await;
    assert_eq!(detail["result"]["survey"]["name"], "고객 만족도");
    assert_eq!(detail["result"]["questions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_list_surveys_without_authentication() {
    let app = spawn_app().await;
    seed_survey(&app.db, "만족도 조사", &["q1"]).await;

    let response = app.public(Method::GET, "/api/v1/surveys", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"][0]["name"], "만족도 조사");
    assert_eq!(body["result"][0]["departmentName"], "고객지원팀");
}

#[tokio::test]
async fn should_reject_survey_with_unknown_department() {
    let app = spawn_app().await;

    let response = app
        .admin(
            Method::POST,
            "/api/v1/surveys",
            Some(json!({ "name": "설문", "departmentId": 999 })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "COMMON400");
    assert_eq!(survey::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_reject_blank_survey_name() {
    let app = spawn_app().await;
    seed_survey(&app.db, "기존", &[]).await;

    let response = app
        .admin(
            Method::POST,
            "/api/v1/surveys",
            Some(json!({ "name": "   ", "departmentId": 1 })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "COMMON400");
}

#[tokio::test]
async fn should_return_400_for_malformed_json() {
    let app = spawn_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/departments")
        .header(header::AUTHORIZATION, common::bearer())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "COMMON400");
}

#[tokio::test]
async fn should_update_survey_and_question() {
    // Arrange
    let app = spawn_app().await;
    let (survey_id, questions) = seed_survey(&app.db, "이전 이름", &["이전 질문"]).await;

    // Act
    let updated = app
        .admin(
            Method::PUT,
            &format!("/api/v1/surveys/{}", survey_id),
            Some(json!({ "name": "새 이름", "description": "설명", "departmentId": 1 })),
        )
        .await;
    let question = app
        .admin(
            Method::PUT,
            &format!("/api/v1/questions/{}", questions[0]),
            Some(json!({ "questionText": "새 질문" })),
        )
        .await;

    // Assert
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["message"], "설문이 수정되었습니다.");
    assert_eq!(body_json(question).await["result"]["questionText"], "새 질문");

    let stored = survey::Entity::find_by_id(survey_id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "새 이름");
    assert_eq!(stored.description, "설명");
}

#[tokio::test]
async fn should_return_404_codes_for_unknown_ids() {
    let app = spawn_app().await;

    let survey = app.admin(Method::GET, "/api/v1/surveys/42", None).await;
    let question = app.admin(Method::DELETE, "/api/v1/questions/42", None).await;
    let department = app.admin(Method::DELETE, "/api/v1/departments/42", None).await;

    assert_eq!(survey.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(survey).await["code"], "SURVEY4041");
    assert_eq!(question.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(question).await["code"], "QUESTION4041");
    assert_eq!(department.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(department).await["code"], "DEPT4041");
}

#[tokio::test]
async fn should_delete_survey_with_questions_and_responses() {
    // Arrange
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "삭제 대상", &["q1", "q2"]).await;
    let (other_id, other_q) = seed_survey(&app.db, "유지 대상", &["q1"]).await;
    seed_response(&app.db, survey_id, &[(q[0], 5), (q[1], 3)], "ok", at("2024-03-01", "09:00:00")).await;
    seed_response(&app.db, other_id, &[(other_q[0], 4)], "", at("2024-03-01", "09:00:00")).await;

    // Act
    let response = app
        .admin(Method::DELETE, &format!("/api/v1/surveys/{}", survey_id), None)
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"]["deletedQuestions"], 2);
    assert_eq!(body["result"]["deletedResponses"], 1);

    assert_eq!(survey::Entity::find().count(&app.db).await.unwrap(), 1);
    assert_eq!(survey_question::Entity::find().count(&app.db).await.unwrap(), 1);
    assert_eq!(survey_response::Entity::find().count(&app.db).await.unwrap(), 1);
    assert_eq!(survey_response_answer::Entity::find().count(&app.db).await.unwrap(), 1);
    assert_eq!(answer_choice::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_delete_question_with_its_answers() {
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "설문", &["q1", "q2"]).await;
    seed_response(&app.db, survey_id, &[(q[0], 5), (q[1], 2)], "", at("2024-03-01", "09:00:00")).await;

    let response = app
        .admin(Method::DELETE, &format!("/api/v1/questions/{}", q[0]), None)
        .await;

    assert_eq!(body_json(response).await["result"]["deletedAnswers"], 1);
    assert_eq!(survey_question::Entity::find().count(&app.db).await.unwrap(), 1);
    assert_eq!(survey_response_answer::Entity::find().count(&app.db).await.unwrap(), 1);
    assert_eq!(survey_response::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_delete_department_with_its_surveys() {
    let app = spawn_app().await;
    let (survey_id, q) = seed_survey(&app.db, "설문", &["q1"]).await;
    seed_response(&app.db, survey_id, &[(q[0], 1)], "", at("2024-03-01", "09:00:00")).await;

    let response = app.admin(Method::DELETE, "/api/v1/departments/1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(department::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(survey::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(survey_response::Entity::find().count(&app.db).await.unwrap(), 0);
}
