//! 부서/설문/질문 조회 및 변경 함수
//!
//! 모든 함수는 `ConnectionTrait`에 대해 제네릭이므로 커넥션 풀과 트랜잭션 양쪽에서 사용할 수 있습니다.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entity::{
    answer_choice, department, survey, survey_question, survey_response, survey_response_answer,
};

pub struct SurveyQuery;

impl SurveyQuery {
    pub async fn list_departments<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Vec<department::Model>, DbErr> {
        department::Entity::find()
            .order_by_asc(department::Column::Id)
            .all(conn)
            .await
    }

    pub async fn find_department<C: ConnectionTrait>(
        conn: &C,
        department_id: i32,
    ) -> Result<Option<department::Model>, DbErr> {
        department::Entity::find_by_id(department_id).one(conn).await
    }

    pub async fn find_survey<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
    ) -> Result<Option<survey::Model>, DbErr> {
        survey::Entity::find_by_id(survey_id).one(conn).await
    }

    pub async fn find_survey_with_department<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
    ) -> Result<Option<(survey::Model, Option<department::Model>)>, DbErr> {
        survey::Entity::find_by_id(survey_id)
            .find_also_related(department::Entity)
            .one(conn)
            .await
    }

    pub async fn list_surveys_with_department<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Vec<(survey::Model, Option<department::Model>)>, DbErr> {
        survey::Entity::find()
            .find_also_related(department::Entity)
            .order_by_asc(survey::Column::Id)
            .all(conn)
            .await
    }

    pub async fn list_questions<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
    ) -> Result<Vec<survey_question::Model>, DbErr> {
        survey_question::Entity::find()
            .filter(survey_question::Column::SurveyId.eq(survey_id))
            .order_by_asc(survey_question::Column::Id)
            .all(conn)
            .await
    }

    pub async fn find_question<C: ConnectionTrait>(
        conn: &C,
        question_id: i32,
    ) -> Result<Option<survey_question::Model>, DbErr> {
        survey_question::Entity::find_by_id(question_id).one(conn).await
    }
}

/// 설문 삭제 시 함께 지워진 행 수
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CascadeSummary {
    pub questions: u64,
    pub responses: u64,
    pub response_answers: u64,
}

pub struct SurveyMutation;

impl SurveyMutation {
    pub async fn create_department<C: ConnectionTrait>(
        conn: &C,
        name: String,
    ) -> Result<department::Model, DbErr> {
        department::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    pub async fn create_survey<C: ConnectionTrait>(
        conn: &C,
        name: String,
        description: String,
        department_id: i32,
    ) -> Result<survey::Model, DbErr> {
        survey::ActiveModel {
            name: Set(name),
            description: Set(description),
            department_id: Set(department_id),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    pub async fn update_survey<C: ConnectionTrait>(
        conn: &C,
        model: survey::Model,
        name: String,
        description: String,
        department_id: i32,
    ) -> Result<survey::Model, DbErr> {
        let mut active: survey::ActiveModel = model.into();
        active.name = Set(name);
        active.description = Set(description);
        active.department_id = Set(department_id);
        active.update(conn).await
    }

    pub async fn create_question<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
        question_text: String,
    ) -> Result<survey_question::Model, DbErr> {
        survey_question::ActiveModel {
            survey_id: Set(survey_id),
            question_text: Set(question_text),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    pub async fn update_question<C: ConnectionTrait>(
        conn: &C,
        model: survey_question::Model,
        question_text: String,
    ) -> Result<survey_question::Model, DbErr> {
        let mut active: survey_question::ActiveModel = model.into();
        active.question_text = Set(question_text);
        active.update(conn).await
    }

    /// 질문과 그 선택지, 응답 답변을 삭제합니다.
    pub async fn delete_question_cascade<C: ConnectionTrait>(
        conn: &C,
        question_id: i32,
    ) -> Result<u64, DbErr> {
        let answers = survey_response_answer::Entity::delete_many()
            .filter(survey_response_answer::Column::QuestionId.eq(question_id))
            .exec(conn)
            .await?;

        answer_choice::Entity::delete_many()
            .filter(answer_choice::Column::QuestionId.eq(question_id))
            .exec(conn)
            .await?;

        survey_question::Entity::delete_by_id(question_id)
            .exec(conn)
            .await?;

        Ok(answers.rows_affected)
    }

    /// 설문과 하위 질문/선택지/응답/응답 답변을 삭제합니다.
    pub async fn delete_survey_cascade<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
    ) -> Result<CascadeSummary, DbErr> {
        let question_ids: Vec<i32> = survey_question::Entity::find()
            .select_only()
            .column(survey_question::Column::Id)
            .filter(survey_question::Column::SurveyId.eq(survey_id))
            .into_tuple()
            .all(conn)
            .await?;

        let response_ids: Vec<i32> = survey_response::Entity::find()
            .select_only()
            .column(survey_response::Column::Id)
            .filter(survey_response::Column::SurveyId.eq(survey_id))
            .into_tuple()
            .all(conn)
            .await?;

        let mut summary = CascadeSummary::default();

        if !question_ids.is_empty() || !response_ids.is_empty() {
            summary.response_answers = survey_response_answer::Entity::delete_many()
                .filter(
                    Condition::any()
                        .add(survey_response_answer::Column::ResponseId.is_in(response_ids.clone()))
                        .add(survey_response_answer::Column::QuestionId.is_in(question_ids.clone())),
                )
                .exec(conn)
                .await?
                .rows_affected;
        }

        if !question_ids.is_empty() {
            answer_choice::Entity::delete_many()
                .filter(answer_choice::Column::QuestionId.is_in(question_ids))
                .exec(conn)
                .await?;
        }

        summary.responses = survey_response::Entity::delete_many()
            .filter(survey_response::Column::SurveyId.eq(survey_id))
            .exec(conn)
            .await?
            .rows_affected;

        summary.questions = survey_question::Entity::delete_many()
            .filter(survey_question::Column::SurveyId.eq(survey_id))
            .exec(conn)
            .await?
            .rows_affected;

        survey::Entity::delete_by_id(survey_id).exec(conn).await?;

        Ok(summary)
    }

    /// 부서와 소속 설문 전체를 삭제합니다.
    pub async fn delete_department_cascade<C: ConnectionTrait>(
        conn: &C,
        department_id: i32,
    ) -> Result<u64, DbErr> {
        let survey_ids: Vec<i32> = survey::Entity::find()
            .select_only()
            .column(survey::Column::Id)
            .filter(survey::Column::DepartmentId.eq(department_id))
            .into_tuple()
            .all(conn)
            .await?;

        for survey_id in &survey_ids {
            Self::delete_survey_cascade(conn, *survey_id).await?;
        }

        department::Entity::delete_by_id(department_id)
            .exec(conn)
            .await?;

        Ok(survey_ids.len() as u64)
    }
}
