use std::collections::{HashMap, HashSet};
use std::net::IpAddr;

use chrono::Utc;
use sea_orm::TransactionTrait;
use tracing::info;

use crate::domain::survey::repository::SurveyQuery;
use crate::domain::survey::SurveyService;
use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{AnswerItem, SubmitResponseRequest};
use super::repository::ResponseMutation;

pub struct ResponseService;

impl ResponseService {
    /// 설문 응답 접수
    ///
    /// 응답 1건과 질문별 응답 답변을 하나의 트랜잭션으로 저장합니다.
    /// 검증 실패 시 아무 행도 만들지 않습니다.
    pub async fn submit(
        state: &AppState,
        survey_id: i32,
        client_ip: IpAddr,
        req: SubmitResponseRequest,
    ) -> Result<i32, AppError> {
        SurveyService::find_survey(state, survey_id).await?;

        let question_ids: Vec<i32> = SurveyQuery::list_questions(&state.db, survey_id)
            .await?
            .into_iter()
            .map(|q| q.id)
            .collect();

        let ratings = Self::match_answers(&question_ids, &req.answers)?;
        let remarks = Self::normalize_remarks(req.remarks.as_deref());

        let txn = state.db.begin().await?;

        let response = ResponseMutation::insert_response(
            &txn,
            survey_id,
            client_ip.to_string(),
            Utc::now().naive_utc(),
            Some(remarks),
        )
        .await?;

        for (question_id, value) in &ratings {
            let choice =
                ResponseMutation::find_or_create_answer_choice(&txn, *question_id, *value).await?;
            ResponseMutation::insert_response_answer(&txn, response.id, *question_id, choice.id)
                .await?;
        }

        txn.commit().await?;

        info!(
            survey_id = survey_id,
            response_id = response.id,
            answers = ratings.len(),
            "설문 응답 접수 완료"
        );

        Ok(response.id)
    }

    /// 설문의 모든 질문에 정확히 하나씩 답했는지 확인하고 질문 순서대로 (질문, 별점)을 돌려줍니다.
    fn match_answers(
        question_ids: &[i32],
        answers: &[AnswerItem],
    ) -> Result<Vec<(i32, i32)>, AppError> {
        let known: HashSet<i32> = question_ids.iter().copied().collect();
        let mut by_question: HashMap<i32, i32> = HashMap::with_capacity(answers.len());

        for answer in answers {
            if !known.contains(&answer.question_id) {
                return Err(AppError::InvalidAnswers(format!(
                    "설문에 없는 질문에 대한 응답입니다. (questionId: {})",
                    answer.question_id
                )));
            }
            if by_question.insert(answer.question_id, answer.value).is_some() {
                return Err(AppError::InvalidAnswers(format!(
                    "같은 질문에 두 번 응답했습니다. (questionId: {})",
                    answer.question_id
                )));
            }
        }

        question_ids
            .iter()
            .map(|id| {
                by_question.get(id).map(|value| (*id, *value)).ok_or_else(|| {
                    AppError::InvalidAnswers(format!(
                        "모든 질문에 응답해야 합니다. (questionId: {})",
                        id
                    ))
                })
            })
            .collect()
    }

    fn normalize_remarks(remarks: Option<&str>) -> String {
        remarks.map(str::trim).unwrap_or_default().to_string()
    }
}
