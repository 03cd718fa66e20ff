use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "survey_response_answer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub response_id: i32,
    pub question_id: i32,
    pub answer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::survey_response::Entity",
        from = "Column::ResponseId",
        to = "super::survey_response::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SurveyResponse,
    #[sea_orm(
        belongs_to = "super::survey_question::Entity",
        from = "Column::QuestionId",
        to = "super::survey_question::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SurveyQuestion,
    #[sea_orm(
        belongs_to = "super::answer_choice::Entity",
        from = "Column::AnswerId",
        to = "super::answer_choice::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    AnswerChoice,
}

impl Related<super::survey_response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyResponse.def()
    }
}

impl Related<super::survey_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyQuestion.def()
    }
}

impl Related<super::answer_choice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnswerChoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
