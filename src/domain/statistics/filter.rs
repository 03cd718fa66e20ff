//! 통계/리포트 기간 필터
//!
//! 빈 문자열은 입력하지 않은 것으로 봅니다. 시작일은 그날 00:00:00부터,
//! 종료일은 그날 23:59:59.999999까지 포함합니다.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{ColumnTrait, Condition};

use crate::domain::survey::entity::survey_response;
use crate::utils::error::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const INVALID_DATE_MESSAGE: &str = "날짜 형식이 올바르지 않습니다. (YYYY-MM-DD 형식 필요)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, AppError> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        self.start.map(|d| d.and_time(NaiveTime::MIN))
    }

    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        self.end.and_then(|d| d.and_hms_micro_opt(23, 59, 59, 999_999))
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.lower_bound().map_or(true, |lo| *ts >= lo)
            && self.upper_bound().map_or(true, |hi| *ts <= hi)
    }

    /// `survey_response.timestamp`에 대한 조회 조건
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(lo) = self.lower_bound() {
            cond = cond.add(survey_response::Column::Timestamp.gte(lo));
        }
        if let Some(hi) = self.upper_bound() {
            cond = cond.add(survey_response::Column::Timestamp.lte(hi));
        }
        cond
    }

    /// 리포트에 표시할 기간 문자열
    pub fn describe(&self) -> String {
        let fmt = |d: Option<NaiveDate>| d.map(|d| d.format(DATE_FORMAT).to_string());
        match (fmt(self.start), fmt(self.end)) {
            (None, None) => "All dates".to_string(),
            (Some(s), Some(e)) => format!("{} ~ {}", s, e),
            (Some(s), None) => format!("{} ~", s),
            (None, Some(e)) => format!("~ {}", e),
        }
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| AppError::InvalidDateFormat(INVALID_DATE_MESSAGE.to_string())),
    }
}
