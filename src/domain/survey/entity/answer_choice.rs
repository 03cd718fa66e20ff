use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 별점 최솟값
pub const MIN_CHOICE_VALUE: i32 = 1;
/// 별점 최댓값
pub const MAX_CHOICE_VALUE: i32 = 5;

/// 질문별 별점 선택지 (값, 질문) 쌍
///
/// 응답 답변은 항상 이 행을 가리킵니다. 같은 (값, 질문) 쌍이 없으면 응답 접수 시 생성됩니다.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "answer_choice")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub choice_value: i32,
    pub question_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::survey_question::Entity",
        from = "Column::QuestionId",
        to = "super::survey_question::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SurveyQuestion,
    #[sea_orm(has_many = "super::survey_response_answer::Entity")]
    SurveyResponseAnswer,
}

impl Related<super::survey_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyQuestion.def()
    }
}

impl Related<super::survey_response_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyResponseAnswer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
