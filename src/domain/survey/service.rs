use sea_orm::TransactionTrait;
use tracing::info;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::format::stars_glyph;

use super::dto::{
    DeleteQuestionResponse, DeleteSurveyResponse, DepartmentCreateRequest, DepartmentItem,
    QuestionItem, QuestionRequest, StarChoice, SurveyDetailResponse, SurveyItem, SurveyRequest,
};
use super::entity::answer_choice::{MAX_CHOICE_VALUE, MIN_CHOICE_VALUE};
use super::entity::{department, survey, survey_question};
use super::repository::{SurveyMutation, SurveyQuery};

pub struct SurveyService;

impl SurveyService {
    // ============== 부서 ==============

    pub async fn list_departments(state: &AppState) -> Result<Vec<DepartmentItem>, AppError> {
        let departments = SurveyQuery::list_departments(&state.db).await?;
        Ok(departments.into_iter().map(DepartmentItem::from).collect())
    }

    pub async fn create_department(
        state: &AppState,
        req: DepartmentCreateRequest,
    ) -> Result<DepartmentItem, AppError> {
        let name = Self::require_text(&req.name, "부서 이름은 비어 있을 수 없습니다.")?;

        let created = SurveyMutation::create_department(&state.db, name).await?;
        info!(department_id = created.id, "부서 생성 완료");

        Ok(created.into())
    }

    /// 부서 삭제 (소속 설문 포함)
    pub async fn delete_department(state: &AppState, department_id: i32) -> Result<u64, AppError> {
        Self::find_department(state, department_id).await?;

        let txn = state.db.begin().await?;
        let deleted_surveys = SurveyMutation::delete_department_cascade(&txn, department_id).await?;
        txn.commit().await?;

        info!(
            department_id = department_id,
            deleted_surveys = deleted_surveys,
            "부서 삭제 완료"
        );
        Ok(deleted_surveys)
    }

    // ============== 설문 ==============

    pub async fn list_surveys(state: &AppState) -> Result<Vec<SurveyItem>, AppError> {
        let surveys = SurveyQuery::list_surveys_with_department(&state.db).await?;
        Ok(surveys
            .into_iter()
            .map(|(survey, department)| SurveyItem::from_models(survey, department))
            .collect())
    }

    pub async fn get_survey(state: &AppState, survey_id: i32) -> Result<SurveyItem, AppError> {
        let (survey, department) = SurveyQuery::find_survey_with_department(&state.db, survey_id)
            .await?
            .ok_or_else(|| Self::survey_not_found(survey_id))?;
        Ok(SurveyItem::from_models(survey, department))
    }

    /// 설문 상세 (질문 목록 포함)
    pub async fn get_survey_detail(
        state: &AppState,
        survey_id: i32,
    ) -> Result<SurveyDetailResponse, AppError> {
        let survey = Self::get_survey(state, survey_id).await?;
        let questions = SurveyQuery::list_questions(&state.db, survey_id).await?;

        Ok(SurveyDetailResponse {
            survey,
            questions: questions.into_iter().map(QuestionItem::from).collect(),
        })
    }

    pub async fn create_survey(
        state: &AppState,
        req: SurveyRequest,
    ) -> Result<SurveyItem, AppError> {
        let name = Self::require_text(&req.name, "설문 이름은 비어 있을 수 없습니다.")?;
        let department = Self::require_department(state, req.department_id).await?;

        let created = SurveyMutation::create_survey(
            &state.db,
            name,
            req.description.trim().to_string(),
            department.id,
        )
        .await?;

        info!(
            survey_id = created.id,
            department_id = department.id,
            "설문 생성 완료"
        );

        Ok(SurveyItem::from_models(created, Some(department)))
    }

    pub async fn update_survey(
        state: &AppState,
        survey_id: i32,
        req: SurveyRequest,
    ) -> Result<SurveyItem, AppError> {
        let existing = Self::find_survey(state, survey_id).await?;
        let name = Self::require_text(&req.name, "설문 이름은 비어 있을 수 없습니다.")?;
        let department = Self::require_department(state, req.department_id).await?;

        let updated = SurveyMutation::update_survey(
            &state.db,
            existing,
            name,
            req.description.trim().to_string(),
            department.id,
        )
        .await?;

        info!(survey_id = survey_id, "설문 수정 완료");
        Ok(SurveyItem::from_models(updated, Some(department)))
    }

    /// 설문 삭제 (질문/응답 포함, 하나의 트랜잭션)
    pub async fn delete_survey(
        state: &AppState,
        survey_id: i32,
    ) -> Result<DeleteSurveyResponse, AppError> {
        Self::find_survey(state, survey_id).await?;

        let txn = state.db.begin().await?;
        let summary = SurveyMutation::delete_survey_cascade(&txn, survey_id).await?;
        txn.commit().await?;

        info!(
            survey_id = survey_id,
            deleted_questions = summary.questions,
            deleted_responses = summary.responses,
            deleted_answers = summary.response_answers,
            "설문 및 연관 데이터 삭제 완료"
        );

        Ok(DeleteSurveyResponse {
            survey_id,
            deleted_questions: summary.questions,
            deleted_responses: summary.responses,
        })
    }

    // ============== 질문 ==============

    pub async fn create_question(
        state: &AppState,
        survey_id: i32,
        req: QuestionRequest,
    ) -> Result<QuestionItem, AppError> {
        Self::find_survey(state, survey_id).await?;
        let text = Self::require_text(&req.question_text, "질문 내용은 비어 있을 수 없습니다.")?;

        let created = SurveyMutation::create_question(&state.db, survey_id, text).await?;
        info!(survey_id = survey_id, question_id = created.id, "질문 생성 완료");

        Ok(created.into())
    }

    pub async fn update_question(
        state: &AppState,
        question_id: i32,
        req: QuestionRequest,
    ) -> Result<QuestionItem, AppError> {
        let existing = Self::find_question(state, question_id).await?;
        let text = Self::require_text(&req.question_text, "질문 내용은 비어 있을 수 없습니다.")?;

        let updated = SurveyMutation::update_question(&state.db, existing, text).await?;
        info!(question_id = question_id, "질문 수정 완료");

        Ok(updated.into())
    }

    pub async fn delete_question(
        state: &AppState,
        question_id: i32,
    ) -> Result<DeleteQuestionResponse, AppError> {
        Self::find_question(state, question_id).await?;

        let txn = state.db.begin().await?;
        let deleted_answers = SurveyMutation::delete_question_cascade(&txn, question_id).await?;
        txn.commit().await?;

        info!(
            question_id = question_id,
            deleted_answers = deleted_answers,
            "질문 삭제 완료"
        );

        Ok(DeleteQuestionResponse {
            question_id,
            deleted_answers,
        })
    }

    // ============== 응답자 화면 ==============

    /// 응답 양식에 표시할 설문과 질문
    pub async fn get_survey_form(
        state: &AppState,
        survey_id: i32,
    ) -> Result<(SurveyItem, Vec<QuestionItem>), AppError> {
        let detail = Self::get_survey_detail(state, survey_id).await?;
        Ok((detail.survey, detail.questions))
    }

    /// 1~5점 선택지
    pub fn star_choices() -> Vec<StarChoice> {
        (MIN_CHOICE_VALUE..=MAX_CHOICE_VALUE)
            .map(|value| StarChoice {
                value,
                label: stars_glyph(value),
            })
            .collect()
    }

    // ============== 내부 헬퍼 ==============

    async fn find_department(
        state: &AppState,
        department_id: i32,
    ) -> Result<department::Model, AppError> {
        SurveyQuery::find_department(&state.db, department_id)
            .await?
            .ok_or_else(|| {
                AppError::DepartmentNotFound(format!(
                    "존재하지 않는 부서입니다. (departmentId: {})",
                    department_id
                ))
            })
    }

    /// 설문 생성/수정 시 부서 참조 검증 (없으면 입력 오류)
    async fn require_department(
        state: &AppState,
        department_id: i32,
    ) -> Result<department::Model, AppError> {
        SurveyQuery::find_department(&state.db, department_id)
            .await?
            .ok_or_else(|| AppError::validation_error("존재하지 않는 부서를 선택했습니다."))
    }

    pub(crate) async fn find_survey(
        state: &AppState,
        survey_id: i32,
    ) -> Result<survey::Model, AppError> {
        SurveyQuery::find_survey(&state.db, survey_id)
            .await?
            .ok_or_else(|| Self::survey_not_found(survey_id))
    }

    async fn find_question(
        state: &AppState,
        question_id: i32,
    ) -> Result<survey_question::Model, AppError> {
        SurveyQuery::find_question(&state.db, question_id)
            .await?
            .ok_or_else(|| {
                AppError::QuestionNotFound(format!(
                    "존재하지 않는 질문입니다. (questionId: {})",
                    question_id
                ))
            })
    }

    pub(crate) fn survey_not_found(survey_id: i32) -> AppError {
        AppError::SurveyNotFound(format!(
            "존재하지 않는 설문입니다. (surveyId: {})",
            survey_id
        ))
    }

    fn require_text(value: &str, message: &str) -> Result<String, AppError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation_error(message));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_five_star_choices_with_glyphs() {
        let choices = SurveyService::star_choices();

        assert_eq!(choices.len(), 5);
        assert_eq!(choices[0].value, 1);
        assert_eq!(choices[0].label, "★☆☆☆☆");
        assert_eq!(choices[4].label, "★★★★★");
    }

    #[test]
    fn should_trim_required_text() {
        let result = SurveyService::require_text("  만족도  ", "err");
        assert_eq!(result.unwrap(), "만족도");
    }

    #[test]
    fn should_reject_blank_required_text() {
        let result = SurveyService::require_text("   ", "이름은 비어 있을 수 없습니다.");
        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("비어")));
    }
}
