//! 응답 저장 함수 (트랜잭션 안에서 호출)

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::domain::survey::entity::{answer_choice, survey_response, survey_response_answer};

pub struct ResponseMutation;

impl ResponseMutation {
    pub async fn insert_response<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
        ip_address: String,
        timestamp: NaiveDateTime,
        remarks: Option<String>,
    ) -> Result<survey_response::Model, DbErr> {
        survey_response::ActiveModel {
            survey_id: Set(survey_id),
            ip_address: Set(ip_address),
            timestamp: Set(timestamp),
            remarks: Set(remarks),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    /// (값, 질문) 선택지 행을 찾고, 없으면 생성합니다.
    pub async fn find_or_create_answer_choice<C: ConnectionTrait>(
        conn: &C,
        question_id: i32,
        value: i32,
    ) -> Result<answer_choice::Model, DbErr> {
        let existing = answer_choice::Entity::find()
            .filter(answer_choice::Column::QuestionId.eq(question_id))
            .filter(answer_choice::Column::ChoiceValue.eq(value))
            .one(conn)
            .await?;

        if let Some(choice) = existing {
            return Ok(choice);
        }

        answer_choice::ActiveModel {
            question_id: Set(question_id),
            choice_value: Set(value),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    pub async fn insert_response_answer<C: ConnectionTrait>(
        conn: &C,
        response_id: i32,
        question_id: i32,
        answer_id: i32,
    ) -> Result<survey_response_answer::Model, DbErr> {
        survey_response_answer::ActiveModel {
            response_id: Set(response_id),
            question_id: Set(question_id),
            answer_id: Set(answer_id),
            ..Default::default()
        }
        .insert(conn)
        .await
    }
}
