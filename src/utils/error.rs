use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use tracing::{error, warn};
use validator::ValidationErrors;

use super::response::ErrorResponse;

const DB_ERROR_MESSAGE: &str = "데이터베이스 처리 중 오류가 발생했습니다.";

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    InternalError(String),
    ValidationError(String),
    JsonParseFailed(String),

    /// 날짜 파라미터 형식 오류 (YYYY-MM-DD)
    InvalidDateFormat(String),
    /// 응답 답변 구성 오류 (누락/중복/범위 밖 질문)
    InvalidAnswers(String),
    DepartmentNotFound(String),
    SurveyNotFound(String),
    QuestionNotFound(String),
    PdfGenerationFailed(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::InternalError(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
            AppError::InvalidDateFormat(msg) => msg.clone(),
            AppError::InvalidAnswers(msg) => msg.clone(),
            AppError::DepartmentNotFound(msg) => msg.clone(),
            AppError::SurveyNotFound(msg) => msg.clone(),
            AppError::QuestionNotFound(msg) => msg.clone(),
            AppError::PdfGenerationFailed(msg) => msg.clone(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::NotFound(_) => "COMMON404",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::InternalError(_) => "COMMON500",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::InvalidDateFormat(_) => "STAT4001",
            AppError::InvalidAnswers(_) => "SURVEY4002",
            AppError::DepartmentNotFound(_) => "DEPT4041",
            AppError::SurveyNotFound(_) => "SURVEY4041",
            AppError::QuestionNotFound(_) => "QUESTION4041",
            AppError::PdfGenerationFailed(_) => "REPORT5001",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::InvalidDateFormat(_)
            | AppError::InvalidAnswers(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_)
            | AppError::DepartmentNotFound(_)
            | AppError::SurveyNotFound(_)
            | AppError::QuestionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) | AppError::PdfGenerationFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        if status.is_server_error() {
            error!(code = %error_code, "Internal Server Error: {}", message);
        } else {
            warn!(code = %error_code, "Error [{}]: {}", error_code, message);
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.to_string())
    }
}

/// DB 오류 상세는 로그에만 남기고 응답에는 일반 메시지를 사용합니다.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        error!(error = %err, "데이터베이스 오류");
        AppError::InternalError(DB_ERROR_MESSAGE.to_string())
    }
}

/// validator 검증 실패 시 첫 번째 필드 메시지를 사용합니다.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = first_validation_message(&errors)
            .unwrap_or_else(|| "입력값이 올바르지 않습니다.".to_string());
        AppError::ValidationError(message)
    }
}

fn first_validation_message(errors: &ValidationErrors) -> Option<String> {
    use validator::ValidationErrorsKind;

    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                if let Some(err) = errs.first() {
                    return Some(
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} 값이 올바르지 않습니다.", field)),
                    );
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                if let Some(msg) = first_validation_message(inner) {
                    return Some(msg);
                }
            }
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    if let Some(msg) = first_validation_message(inner) {
                        return Some(msg);
                    }
                }
            }
        }
    }
    None
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}
