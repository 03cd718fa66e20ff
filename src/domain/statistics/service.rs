use tracing::debug;

use crate::domain::survey::dto::SurveyItem;
use crate::domain::survey::repository::SurveyQuery;
use crate::domain::survey::SurveyService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{paginate, PageRequest};

use super::aggregate::{build_question_statistics, group_remarks, QuestionStatistics, RemarkGroup};
use super::dto::{QuestionStatisticsItem, StatisticsQuery, SurveyStatisticsResponse};
use super::filter::DateRange;
use super::repository::AggregateQuery;

/// 의견 목록 페이지 크기
pub const REMARKS_PER_PAGE: usize = 5;

/// 한 설문의 기간 내 집계 결과
#[derive(Debug, Clone)]
pub struct SurveyStatistics {
    pub survey: SurveyItem,
    pub range: DateRange,
    pub total_responses: u64,
    pub questions: Vec<QuestionStatistics>,
    pub remarks: Vec<RemarkGroup>,
}

pub struct StatisticsService;

impl StatisticsService {
    /// 설문 집계
    ///
    /// 통계 화면과 리포트가 같은 함수를 사용합니다.
    pub async fn compute(
        state: &AppState,
        survey_id: i32,
        range: DateRange,
    ) -> Result<SurveyStatistics, AppError> {
        let survey = SurveyService::get_survey(state, survey_id).await?;
        let questions = SurveyQuery::list_questions(&state.db, survey_id).await?;

        let total_responses = AggregateQuery::count_responses(&state.db, survey_id, &range).await?;
        let ratings = AggregateQuery::ratings(&state.db, survey_id, &range).await?;
        let remark_rows = AggregateQuery::remark_rows(&state.db, survey_id, &range).await?;

        debug!(
            survey_id = survey_id,
            total_responses = total_responses,
            ratings = ratings.len(),
            remarks = remark_rows.len(),
            "설문 집계 완료"
        );

        Ok(SurveyStatistics {
            survey,
            range,
            total_responses,
            questions: build_question_statistics(&questions, &ratings),
            remarks: group_remarks(remark_rows),
        })
    }

    /// 통계 화면
    ///
    /// 설문 존재 여부를 먼저 확인한 뒤 날짜를 해석합니다.
    pub async fn get_statistics(
        state: &AppState,
        survey_id: i32,
        query: &StatisticsQuery,
    ) -> Result<SurveyStatisticsResponse, AppError> {
        SurveyService::find_survey(state, survey_id).await?;
        let range = DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())?;

        let stats = Self::compute(state, survey_id, range).await?;
        let page = PageRequest::parse(query.page.as_deref());

        Ok(SurveyStatisticsResponse {
            survey: stats.survey,
            start_date: non_empty(query.start_date.as_deref()),
            end_date: non_empty(query.end_date.as_deref()),
            total_responses: stats.total_responses,
            questions: stats
                .questions
                .iter()
                .map(QuestionStatisticsItem::from)
                .collect(),
            remarks: paginate(stats.remarks, page, REMARKS_PER_PAGE).into(),
            messages: Vec::new(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
