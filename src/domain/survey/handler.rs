use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use super::dto::{
    DeleteQuestionResponse, DeleteSurveyResponse, DepartmentCreateRequest, DepartmentItem,
    QuestionItem, QuestionRequest, SurveyDetailResponse, SurveyFormResponse, SurveyItem,
    SurveyRequest, SurveySelectionResponse,
};
use super::service::SurveyService;
use super::SELECTION_PATH;
use crate::state::AppState;
use crate::utils::auth::AdminUser;
use crate::utils::error::AppError;
use crate::utils::flash::{self, FlashMessage};
use crate::utils::BaseResponse;

// ============== 부서 ==============

/// 부서 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "부서 목록 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn list_departments(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<Vec<DepartmentItem>>>, AppError> {
    let result = SurveyService::list_departments(&state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 부서 생성 API
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = DepartmentCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "부서 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn create_department(
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<DepartmentCreateRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<DepartmentItem>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = SurveyService::create_department(&state, req).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "부서가 생성되었습니다.",
    )))
}

/// 부서 삭제 API (소속 설문 포함)
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{departmentId}",
    params(("departmentId" = i32, Path, description = "부서 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "부서 삭제 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 부서", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn delete_department(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(department_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let deleted_surveys = SurveyService::delete_department(&state, department_id).await?;
    Ok(Json(BaseResponse::message_only(format!(
        "부서가 삭제되었습니다. (삭제된 설문 {}개)",
        deleted_surveys
    ))))
}

// ============== 설문 ==============

/// 설문 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/surveys",
    responses((status = 200, description = "설문 목록 조회 성공")),
    tag = "Survey"
)]
pub async fn list_surveys(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<SurveyItem>>>, AppError> {
    let result = SurveyService::list_surveys(&state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 설문 생성 API
#[utoipa::path(
    post,
    path = "/api/v1/surveys",
    request_body = SurveyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설문 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn create_survey(
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<SurveyRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<SurveyItem>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = SurveyService::create_survey(&state, req).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "설문이 생성되었습니다.",
    )))
}

/// 설문 상세 조회 API (관리 화면)
#[utoipa::path(
    get,
    path = "/api/v1/surveys/{surveyId}",
    params(("surveyId" = i32, Path, description = "설문 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설문 상세 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn get_survey(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(survey_id): Path<i32>,
) -> Result<Json<BaseResponse<SurveyDetailResponse>>, AppError> {
    let result = SurveyService::get_survey_detail(&state, survey_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 설문 수정 API
#[utoipa::path(
    put,
    path = "/api/v1/surveys/{surveyId}",
    params(("surveyId" = i32, Path, description = "설문 ID")),
    request_body = SurveyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설문 수정 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn update_survey(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(survey_id): Path<i32>,
    payload: Result<Json<SurveyRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<SurveyItem>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = SurveyService::update_survey(&state, survey_id, req).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "설문이 수정되었습니다.",
    )))
}

/// 설문 삭제 API
///
/// 설문에 속한 질문, 선택지, 응답, 응답 답변을 함께 삭제합니다.
#[utoipa::path(
    delete,
    path = "/api/v1/surveys/{surveyId}",
    params(("surveyId" = i32, Path, description = "설문 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설문 삭제 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Survey"
)]
pub async fn delete_survey(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(survey_id): Path<i32>,
) -> Result<Json<BaseResponse<DeleteSurveyResponse>>, AppError> {
    let result = SurveyService::delete_survey(&state, survey_id).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "설문이 삭제되었습니다.",
    )))
}

// ============== 질문 ==============

/// 질문 생성 API
#[utoipa::path(
    post,
    path = "/api/v1/surveys/{surveyId}/questions",
    params(("surveyId" = i32, Path, description = "설문 ID")),
    request_body = QuestionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "질문 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn create_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(survey_id): Path<i32>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<QuestionItem>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = SurveyService::create_question(&state, survey_id, req).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "질문이 추가되었습니다.",
    )))
}

/// 질문 수정 API
#[utoipa::path(
    put,
    path = "/api/v1/questions/{questionId}",
    params(("questionId" = i32, Path, description = "질문 ID")),
    request_body = QuestionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "질문 수정 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 질문", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn update_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(question_id): Path<i32>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<QuestionItem>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = SurveyService::update_question(&state, question_id, req).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "질문이 수정되었습니다.",
    )))
}

/// 질문 삭제 API
#[utoipa::path(
    delete,
    path = "/api/v1/questions/{questionId}",
    params(("questionId" = i32, Path, description = "질문 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "질문 삭제 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 질문", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn delete_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(question_id): Path<i32>,
) -> Result<Json<BaseResponse<DeleteQuestionResponse>>, AppError> {
    let result = SurveyService::delete_question(&state, question_id).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "질문이 삭제되었습니다.",
    )))
}

// ============== 응답자 화면 ==============

/// 설문 선택 화면 API
///
/// 리다이렉트로 전달된 flash 메시지를 함께 반환하고 소비합니다.
#[utoipa::path(
    get,
    path = "/api/v1/surveys/selection",
    responses((status = 200, description = "설문 선택 목록 조회 성공")),
    tag = "Respondent"
)]
pub async fn survey_selection(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<BaseResponse<SurveySelectionResponse>>), AppError> {
    let surveys = SurveyService::list_surveys(&state).await?;
    let (jar, messages) = flash::take(jar);

    Ok((
        jar,
        Json(BaseResponse::success(SurveySelectionResponse {
            surveys,
            messages,
        })),
    ))
}

/// 설문 응답 양식 API
///
/// 존재하지 않는 설문이면 경고 메시지와 함께 설문 선택 화면으로 이동합니다.
#[utoipa::path(
    get,
    path = "/api/v1/surveys/{surveyId}/form",
    params(("surveyId" = i32, Path, description = "설문 ID")),
    responses(
        (status = 200, description = "응답 양식 조회 성공"),
        (status = 303, description = "존재하지 않는 설문 - 설문 선택 화면으로 이동")
    ),
    tag = "Respondent"
)]
pub async fn survey_form(
    State(state): State<AppState>,
    Path(survey_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match SurveyService::get_survey_form(&state, survey_id).await {
        Ok((survey, questions)) => {
            let (jar, messages) = flash::take(jar);
            let body = SurveyFormResponse {
                survey,
                questions,
                choices: SurveyService::star_choices(),
                messages,
            };
            Ok((jar, Json(BaseResponse::success(body))).into_response())
        }
        Err(AppError::SurveyNotFound(_)) => {
            let jar = flash::push(
                jar,
                FlashMessage::warning("존재하지 않는 설문입니다. 설문을 다시 선택해 주세요."),
            );
            Ok((jar, Redirect::to(SELECTION_PATH)).into_response())
        }
        Err(e) => Err(e),
    }
}
