//! 통계 집계용 조회 함수

use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use super::aggregate::RemarkRow;
use super::filter::DateRange;
use crate::domain::survey::entity::{answer_choice, survey_response, survey_response_answer};

pub struct AggregateQuery;

impl AggregateQuery {
    /// 기간 내 응답 수
    pub async fn count_responses<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
        range: &DateRange,
    ) -> Result<u64, DbErr> {
        survey_response::Entity::find()
            .filter(survey_response::Column::SurveyId.eq(survey_id))
            .filter(range.condition())
            .count(conn)
            .await
    }

    /// 기간 내 응답의 (질문 ID, 별점) 목록
    pub async fn ratings<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
        range: &DateRange,
    ) -> Result<Vec<(i32, i32)>, DbErr> {
        survey_response_answer::Entity::find()
            .select_only()
            .column(survey_response_answer::Column::QuestionId)
            .column(answer_choice::Column::ChoiceValue)
            .join(
                JoinType::InnerJoin,
                survey_response_answer::Relation::AnswerChoice.def(),
            )
            .join(
                JoinType::InnerJoin,
                survey_response_answer::Relation::SurveyResponse.def(),
            )
            .filter(survey_response::Column::SurveyId.eq(survey_id))
            .filter(range.condition())
            .into_tuple()
            .all(conn)
            .await
    }

    /// 기간 내 의견이 있는 응답 (응답 ID 순)
    pub async fn remark_rows<C: ConnectionTrait>(
        conn: &C,
        survey_id: i32,
        range: &DateRange,
    ) -> Result<Vec<RemarkRow>, DbErr> {
        let rows: Vec<(i32, Option<String>, NaiveDateTime)> = survey_response::Entity::find()
            .select_only()
            .column(survey_response::Column::Id)
            .column(survey_response::Column::Remarks)
            .column(survey_response::Column::Timestamp)
            .filter(survey_response::Column::SurveyId.eq(survey_id))
            .filter(survey_response::Column::Remarks.is_not_null())
            .filter(survey_response::Column::Remarks.ne(""))
            .filter(range.condition())
            .order_by_asc(survey_response::Column::Id)
            .into_tuple()
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(response_id, remarks, timestamp)| {
                remarks.map(|remarks| RemarkRow {
                    response_id,
                    remarks,
                    timestamp,
                })
            })
            .collect())
    }
}
