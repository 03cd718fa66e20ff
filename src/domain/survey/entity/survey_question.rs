use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "survey_question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub survey_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::survey::Entity",
        from = "Column::SurveyId",
        to = "super::survey::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Survey,
    #[sea_orm(has_many = "super::answer_choice::Entity")]
    AnswerChoice,
    #[sea_orm(has_many = "super::survey_response_answer::Entity")]
    SurveyResponseAnswer,
}

impl Related<super::survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Survey.def()
    }
}

impl Related<super::answer_choice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnswerChoice.def()
    }
}

impl Related<super::survey_response_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyResponseAnswer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
