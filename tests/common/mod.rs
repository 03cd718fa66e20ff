//! 통합 테스트 공용 헬퍼
//!
//! 인메모리 SQLite에 운영 코드와 같은 스키마 동기화로 테이블을 만들고 실제 라우터를 구성합니다.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chrono::NaiveDateTime;
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

use survey_server::config::{create_tables, AppConfig};
use survey_server::domain::response::repository::ResponseMutation;
use survey_server::domain::survey::repository::SurveyMutation;
use survey_server::utils::auth::JwtAuthenticator;
use survey_server::utils::jwt::encode_token;
use survey_server::{app, AppState};

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const CLIENT_IP: &str = "203.0.113.10";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        pdf_font_dir: "./tests/fonts-not-installed".to_string(),
        pdf_font_family: "NanumGothic".to_string(),
        trust_proxy_headers: true,
    }
}

/// `tests/fonts`의 DejaVuSans Regular 폰트로 PDF를 렌더링하는 설정
pub fn test_config_with_fonts() -> AppConfig {
    AppConfig {
        pdf_font_dir: format!("{}/tests/fonts", env!("CARGO_MANIFEST_DIR")),
        pdf_font_family: "DejaVuSans".to_string(),
        ..test_config()
    }
}

pub async fn setup_db() -> DatabaseConnection {
    // 인메모리 DB는 커넥션마다 따로 생기므로 하나만 사용
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("sqlite 연결 실패");
    create_tables(&db).await.expect("테이블 생성 실패");
    db
}

pub async fn spawn_app_with(config: AppConfig) -> TestApp {
    let db = setup_db().await;
    let state = AppState {
        db: db.clone(),
        authenticator: JwtAuthenticator::shared(config.jwt_secret.clone()),
        config,
    };
    TestApp {
        router: app(state),
        db,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub fn admin_token() -> String {
    encode_token("admin-1".to_string(), TEST_SECRET, 3600).expect("토큰 생성 실패")
}

pub fn bearer() -> String {
    format!("Bearer {}", admin_token())
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("요청 처리 실패")
    }

    /// 관리자 토큰을 붙인 JSON 요청
    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer());
        self.send(with_json(builder, body)).await
    }

    /// 응답자 화면 요청 (인증 없음)
    pub async fn public(&self, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", CLIENT_IP);
        self.send(with_json(builder, body)).await
    }

    pub async fn submit(&self, survey_id: i32, body: Value) -> Response<Body> {
        self.public(
            Method::POST,
            &format!("/api/v1/surveys/{}/responses", survey_id),
            Some(body),
        )
        .await
    }
}

fn with_json(builder: axum::http::request::Builder, body: Option<Value>) -> Request<Body> {
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("요청 생성 실패"),
        None => builder.body(Body::empty()).expect("요청 생성 실패"),
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("본문 읽기 실패")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("JSON 파싱 실패")
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `Set-Cookie`에서 `name=value` 부분만 추출
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(String::from)
}

/// 부서, 설문, 질문을 만들고 (설문 ID, 질문 ID 목록)을 돌려줍니다.
pub async fn seed_survey(db: &DatabaseConnection, name: &str, questions: &[&str]) -> (i32, Vec<i32>) {
    let department = SurveyMutation::create_department(db, "고객지원팀".to_string())
        .await
        .expect("부서 생성 실패");
    let survey = SurveyMutation::create_survey(db, name.to_string(), String::new(), department.id)
        .await
        .expect("설문 생성 실패");

    let mut question_ids = Vec::new();
    for text in questions {
        let question = SurveyMutation::create_question(db, survey.id, text.to_string())
            .await
            .expect("질문 생성 실패");
        question_ids.push(question.id);
    }
    (survey.id, question_ids)
}

/// 지정한 시각의 응답을 직접 저장합니다.
pub async fn seed_response(
    db: &DatabaseConnection,
    survey_id: i32,
    ratings: &[(i32, i32)],
    remarks: &str,
    timestamp: NaiveDateTime,
) -> i32 {
    let response = ResponseMutation::insert_response(
        db,
        survey_id,
        CLIENT_IP.to_string(),
        timestamp,
        Some(remarks.to_string()),
    )
    .await
    .expect("응답 저장 실패");

    for (question_id, value) in ratings {
        let choice = ResponseMutation::find_or_create_answer_choice(db, *question_id, *value)
            .await
            .expect("선택지 저장 실패");
        ResponseMutation::insert_response_answer(db, response.id, *question_id, choice.id)
            .await
            .expect("응답 답변 저장 실패");
    }
    response.id
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S")
        .expect("시각 파싱 실패")
}
