use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Redirect,
    Json,
};
use validator::Validate;

use super::dto::{SubmitResponseRequest, ThankYouResponse};
use super::service::ResponseService;
use super::THANK_YOU_PATH;
use crate::state::AppState;
use crate::utils::client_ip::ClientIp;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 설문 응답 제출 API
///
/// 익명 응답을 접수하고 완료 화면으로 이동합니다. 응답자의 IP 주소가 함께 저장됩니다.
#[utoipa::path(
    post,
    path = "/api/v1/surveys/{surveyId}/responses",
    params(("surveyId" = i32, Path, description = "설문 ID")),
    request_body = SubmitResponseRequest,
    responses(
        (status = 303, description = "응답 접수 성공 - 완료 화면으로 이동"),
        (status = 400, description = "잘못된 응답", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse)
    ),
    tag = "Respondent"
)]
pub async fn submit_response(
    State(state): State<AppState>,
    Path(survey_id): Path<i32>,
    ClientIp(client_ip): ClientIp,
    payload: Result<Json<SubmitResponseRequest>, JsonRejection>,
) -> Result<Redirect, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    ResponseService::submit(&state, survey_id, client_ip, req).await?;
    Ok(Redirect::to(THANK_YOU_PATH))
}

/// 응답 완료 화면 API
#[utoipa::path(
    get,
    path = "/thank-you",
    responses((status = 200, description = "응답 완료 안내")),
    tag = "Respondent"
)]
pub async fn thank_you() -> Json<BaseResponse<ThankYouResponse>> {
    Json(BaseResponse::success(ThankYouResponse {
        message: "설문에 참여해 주셔서 감사합니다.".to_string(),
    }))
}
