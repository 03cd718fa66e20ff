pub mod config;
pub mod domain;
pub mod global;
pub mod shutdown;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{health, response, statistics, survey};
use crate::global::middleware::request_id_middleware;
use crate::utils::error::AppError;
pub use crate::state::AppState;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::survey::handler::list_departments,
        domain::survey::handler::create_department,
        domain::survey::handler::delete_department,
        domain::survey::handler::list_surveys,
        domain::survey::handler::create_survey,
        domain::survey::handler::get_survey,
        domain::survey::handler::update_survey,
        domain::survey::handler::delete_survey,
        domain::survey::handler::create_question,
        domain::survey::handler::update_question,
        domain::survey::handler::delete_question,
        domain::survey::handler::survey_selection,
        domain::survey::handler::survey_form,
        domain::response::handler::submit_response,
        domain::response::handler::thank_you,
        domain::statistics::handler::get_statistics,
        domain::statistics::handler::export_report,
    ),
    components(
        schemas(
            domain::health::dto::HealthStatus,
            domain::health::dto::HealthState,
            domain::health::dto::HealthChecks,
            domain::health::dto::CheckResult,
            domain::survey::dto::DepartmentCreateRequest,
            domain::survey::dto::DepartmentItem,
            domain::survey::dto::SurveyRequest,
            domain::survey::dto::SurveyItem,
            domain::survey::dto::SurveyDetailResponse,
            domain::survey::dto::DeleteSurveyResponse,
            domain::survey::dto::QuestionRequest,
            domain::survey::dto::QuestionItem,
            domain::survey::dto::DeleteQuestionResponse,
            domain::survey::dto::SurveySelectionResponse,
            domain::survey::dto::StarChoice,
            domain::survey::dto::SurveyFormResponse,
            domain::response::dto::SubmitResponseRequest,
            domain::response::dto::AnswerItem,
            domain::response::dto::ThankYouResponse,
            domain::statistics::dto::SurveyStatisticsResponse,
            domain::statistics::dto::QuestionStatisticsItem,
            domain::statistics::dto::StarCountItem,
            domain::statistics::dto::RemarksPage,
            domain::statistics::dto::RemarkItem,
            utils::flash::FlashMessage,
            utils::flash::FlashLevel,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "서버 상태 API"),
        (name = "Department", description = "부서 관리 API"),
        (name = "Survey", description = "설문 관리 API"),
        (name = "Question", description = "질문 관리 API"),
        (name = "Respondent", description = "응답자 화면 API"),
        (name = "Statistics", description = "통계 및 리포트 API")
    )
)]
pub struct ApiDoc;

async fn route_not_found() -> AppError {
    AppError::not_found("요청한 경로를 찾을 수 없습니다.")
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        // 부서
        .route(
            "/api/v1/departments",
            get(survey::handler::list_departments).post(survey::handler::create_department),
        )
        .route(
            "/api/v1/departments/:department_id",
            axum::routing::delete(survey::handler::delete_department),
        )
        // 설문
        .route(
            "/api/v1/surveys",
            get(survey::handler::list_surveys).post(survey::handler::create_survey),
        )
        .route(
            "/api/v1/surveys/selection",
            get(survey::handler::survey_selection),
        )
        .route(
            "/api/v1/surveys/:survey_id",
            get(survey::handler::get_survey)
                .put(survey::handler::update_survey)
                .delete(survey::handler::delete_survey),
        )
        // 질문
        .route(
            "/api/v1/surveys/:survey_id/questions",
            post(survey::handler::create_question),
        )
        .route(
            "/api/v1/questions/:question_id",
            put(survey::handler::update_question).delete(survey::handler::delete_question),
        )
        // 응답자
        .route(
            "/api/v1/surveys/:survey_id/form",
            get(survey::handler::survey_form),
        )
        .route(
            "/api/v1/surveys/:survey_id/responses",
            post(response::handler::submit_response),
        )
        .route(response::THANK_YOU_PATH, get(response::handler::thank_you))
        // 통계
        .route(
            "/api/v1/surveys/:survey_id/statistics",
            get(statistics::handler::get_statistics),
        )
        .route(
            "/api/v1/surveys/:survey_id/report",
            get(statistics::handler::export_report),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
