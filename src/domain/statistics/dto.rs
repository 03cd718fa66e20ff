use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::aggregate::{QuestionStatistics, RemarkGroup};
use crate::domain::survey::dto::SurveyItem;
use crate::utils::flash::FlashMessage;
use crate::utils::format::stars_glyph;
use crate::utils::pagination::Page;

/// 통계 조회 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatisticsQuery {
    /// 시작일 (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// 종료일 (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// 의견 페이지 번호
    pub page: Option<String>,
}

/// 리포트 다운로드 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// 시작일 (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// 종료일 (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// true이면 브라우저에서 바로 열기
    pub view: Option<String>,
}

impl ReportQuery {
    pub fn is_inline(&self) -> bool {
        self.view
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStatisticsResponse {
    pub survey: SurveyItem,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_responses: u64,
    pub questions: Vec<QuestionStatisticsItem>,
    pub remarks: RemarksPage,
    pub messages: Vec<FlashMessage>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatisticsItem {
    pub question_id: i32,
    pub question_text: String,
    pub star_counts: Vec<StarCountItem>,
    pub total_answers: u64,
    /// 기간 내 응답이 없으면 null
    pub average: Option<f64>,
}

impl From<&QuestionStatistics> for QuestionStatisticsItem {
    fn from(stats: &QuestionStatistics) -> Self {
        Self {
            question_id: stats.question_id,
            question_text: stats.question_text.clone(),
            star_counts: stats
                .histogram
                .iter()
                .map(|(value, count)| StarCountItem {
                    value,
                    label: stars_glyph(value),
                    count,
                })
                .collect(),
            total_answers: stats.histogram.total(),
            average: stats.histogram.average(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StarCountItem {
    pub value: i32,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemarksPage {
    pub items: Vec<RemarkItem>,
    pub page: usize,
    pub num_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub total_count: usize,
}

impl From<Page<RemarkGroup>> for RemarksPage {
    fn from(page: Page<RemarkGroup>) -> Self {
        Self {
            items: page.items.into_iter().map(RemarkItem::from).collect(),
            page: page.page,
            num_pages: page.num_pages,
            has_next: page.has_next,
            has_previous: page.has_previous,
            total_count: page.total_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemarkItem {
    pub response_id: i32,
    pub remarks: String,
    pub count: usize,
    pub timestamps: Vec<NaiveDateTime>,
}

impl From<RemarkGroup> for RemarkItem {
    fn from(group: RemarkGroup) -> Self {
        Self {
            response_id: group.response_id,
            remarks: group.remarks,
            count: group.count,
            timestamps: group.timestamps,
        }
    }
}
