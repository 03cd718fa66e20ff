use axum::{
    extract::{Path, Query, RawQuery, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::info;

use super::dto::{ReportQuery, StatisticsQuery};
use super::filter::DateRange;
use super::report::{render_pdf, report_filename, report_headers, ReportContent};
use super::service::StatisticsService;
use crate::domain::survey::{SurveyService, SELECTION_PATH};
use crate::state::AppState;
use crate::utils::auth::AdminUser;
use crate::utils::error::AppError;
use crate::utils::flash::{self, FlashMessage};
use crate::utils::BaseResponse;

/// 설문 통계 조회 API
///
/// 질문별 별점 분포와 평균, 기간 내 응답 수, 의견 목록(5개씩)을 반환합니다.
/// 존재하지 않는 설문이면 설문 선택 화면으로, 날짜 형식이 잘못되면 필터 없는 통계 화면으로 이동합니다.
#[utoipa::path(
    get,
    path = "/api/v1/surveys/{surveyId}/statistics",
    params(
        ("surveyId" = i32, Path, description = "설문 ID"),
        StatisticsQuery
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "통계 조회 성공"),
        (status = 303, description = "잘못된 설문 또는 날짜 - 안내 메시지와 함께 이동"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_statistics(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(survey_id): Path<i32>,
    RawQuery(raw_query): RawQuery,
    Query(query): Query<StatisticsQuery>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match StatisticsService::get_statistics(&state, survey_id, &query).await {
        Ok(mut result) => {
            let (jar, messages) = flash::take(jar);
            result.messages = messages;
            Ok((jar, Json(BaseResponse::success(result))).into_response())
        }
        Err(AppError::SurveyNotFound(msg)) => {
            let target = match raw_query.filter(|q| !q.is_empty()) {
                Some(q) => format!("{}?{}", SELECTION_PATH, q),
                None => SELECTION_PATH.to_string(),
            };
            let jar = flash::push(jar, FlashMessage::warning(msg));
            Ok((jar, Redirect::to(&target)).into_response())
        }
        Err(AppError::InvalidDateFormat(msg)) => {
            let target = format!("/api/v1/surveys/{}/statistics", survey_id);
            let jar = flash::push(jar, FlashMessage::error(msg));
            Ok((jar, Redirect::to(&target)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// 설문 리포트 PDF API
///
/// 통계 화면과 같은 집계를 PDF로 내려줍니다. `view=true`이면 브라우저에서 바로 엽니다.
#[utoipa::path(
    get,
    path = "/api/v1/surveys/{surveyId}/report",
    params(
        ("surveyId" = i32, Path, description = "설문 ID"),
        ReportQuery
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "PDF 생성 성공 (application/pdf)"),
        (status = 400, description = "날짜 형식 오류", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 설문", body = ErrorResponse),
        (status = 500, description = "PDF 생성 실패", body = ErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn export_report(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(survey_id): Path<i32>,
    Query(query): Query<ReportQuery>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    SurveyService::find_survey(&state, survey_id).await?;
    let range = DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())?;

    let stats = StatisticsService::compute(&state, survey_id, range).await?;
    let content = ReportContent::build(&stats, Utc::now().naive_utc());
    let pdf_bytes = render_pdf(
        &content,
        &state.config.pdf_font_dir,
        &state.config.pdf_font_family,
    )?;

    let filename = report_filename(&stats.survey.name);
    let headers = report_headers(&filename, query.is_inline())?;

    info!(
        survey_id = survey_id,
        total_responses = stats.total_responses,
        pdf_size = pdf_bytes.len(),
        "설문 리포트 생성 완료"
    );

    Ok((headers, pdf_bytes))
}
