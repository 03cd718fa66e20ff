use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 설문 응답 제출 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    /// 질문별 별점 (설문의 모든 질문에 대해 정확히 하나씩)
    #[validate(nested)]
    pub answers: Vec<AnswerItem>,

    /// 자유 의견 (선택)
    #[serde(default)]
    #[validate(length(max = 2000, message = "의견은 2000자를 초과할 수 없습니다."))]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerItem {
    pub question_id: i32,

    #[validate(range(min = 1, max = 5, message = "별점은 1~5 사이여야 합니다."))]
    #[schema(example = 4)]
    pub value: i32,
}

/// 제출 완료 화면
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouResponse {
    pub message: String,
}
