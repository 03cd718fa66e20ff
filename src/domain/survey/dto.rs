use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::{department, survey, survey_question};
use crate::utils::flash::FlashMessage;

// ============== 부서 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCreateRequest {
    #[validate(length(min = 1, max = 200, message = "부서 이름은 1~200자여야 합니다."))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentItem {
    pub department_id: i32,
    pub name: String,
}

impl From<department::Model> for DepartmentItem {
    fn from(model: department::Model) -> Self {
        Self {
            department_id: model.id,
            name: model.name,
        }
    }
}

// ============== 설문 ==============

/// 설문 생성/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRequest {
    #[validate(length(min = 1, max = 200, message = "설문 이름은 1~200자여야 합니다."))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "설문 설명은 5000자를 초과할 수 없습니다."))]
    pub description: String,

    #[validate(range(min = 1, message = "departmentId는 1 이상이어야 합니다."))]
    pub department_id: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyItem {
    pub survey_id: i32,
    pub name: String,
    pub description: String,
    pub department_id: i32,
    pub department_name: Option<String>,
}

impl SurveyItem {
    pub fn from_models(survey: survey::Model, department: Option<department::Model>) -> Self {
        Self {
            survey_id: survey.id,
            name: survey.name,
            description: survey.description,
            department_id: survey.department_id,
            department_name: department.map(|d| d.name),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDetailResponse {
    pub survey: SurveyItem,
    pub questions: Vec<QuestionItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSurveyResponse {
    pub survey_id: i32,
    pub deleted_questions: u64,
    pub deleted_responses: u64,
}

// ============== 질문 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[validate(length(min = 1, max = 1000, message = "질문 내용은 1~1000자여야 합니다."))]
    pub question_text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    pub question_id: i32,
    pub survey_id: i32,
    pub question_text: String,
}

impl From<survey_question::Model> for QuestionItem {
    fn from(model: survey_question::Model) -> Self {
        Self {
            question_id: model.id,
            survey_id: model.survey_id,
            question_text: model.question_text,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuestionResponse {
    pub question_id: i32,
    pub deleted_answers: u64,
}

// ============== 응답자 화면 ==============

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveySelectionResponse {
    pub surveys: Vec<SurveyItem>,
    pub messages: Vec<FlashMessage>,
}

/// 별점 선택지 (값과 표시용 별 문자열)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StarChoice {
    pub value: i32,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyFormResponse {
    pub survey: SurveyItem,
    pub questions: Vec<QuestionItem>,
    pub choices: Vec<StarChoice>,
    pub messages: Vec<FlashMessage>,
}
