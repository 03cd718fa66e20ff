//! 별점 분포, 평균, 의견 묶음 계산
//!
//! 통계 화면과 PDF 리포트가 같은 결과를 내도록 DB 조회와 분리된 순수 함수로 둡니다.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::domain::survey::entity::answer_choice::{MAX_CHOICE_VALUE, MIN_CHOICE_VALUE};
use crate::domain::survey::entity::survey_question;

const STAR_LEVELS: usize = (MAX_CHOICE_VALUE - MIN_CHOICE_VALUE + 1) as usize;

/// 별점 1~5 각각의 응답 수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarHistogram {
    counts: [u64; STAR_LEVELS],
}

impl StarHistogram {
    /// 범위 밖의 값은 무시합니다.
    pub fn record(&mut self, value: i32) {
        if let Some(slot) = Self::slot(value) {
            self.counts[slot] += 1;
        }
    }

    pub fn count(&self, value: i32) -> u64 {
        Self::slot(value).map_or(0, |slot| self.counts[slot])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// 응답이 없으면 `None`
    pub fn average(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let sum: u64 = (MIN_CHOICE_VALUE..=MAX_CHOICE_VALUE)
            .map(|value| value as u64 * self.count(value))
            .sum();
        Some(sum as f64 / total as f64)
    }

    /// (별점, 응답 수) 목록
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        (MIN_CHOICE_VALUE..=MAX_CHOICE_VALUE).map(move |value| (value, self.count(value)))
    }

    fn slot(value: i32) -> Option<usize> {
        if (MIN_CHOICE_VALUE..=MAX_CHOICE_VALUE).contains(&value) {
            Some((value - MIN_CHOICE_VALUE) as usize)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionStatistics {
    pub question_id: i32,
    pub question_text: String,
    pub histogram: StarHistogram,
}

/// 질문 순서를 유지한 채 (질문 ID, 별점) 목록을 질문별 분포로 모읍니다.
pub fn build_question_statistics(
    questions: &[survey_question::Model],
    ratings: &[(i32, i32)],
) -> Vec<QuestionStatistics> {
    let mut histograms: HashMap<i32, StarHistogram> = HashMap::new();
    for (question_id, value) in ratings {
        histograms.entry(*question_id).or_default().record(*value);
    }

    questions
        .iter()
        .map(|q| QuestionStatistics {
            question_id: q.id,
            question_text: q.question_text.clone(),
            histogram: histograms.get(&q.id).copied().unwrap_or_default(),
        })
        .collect()
}

/// 기간 내 응답의 의견 한 줄
#[derive(Debug, Clone, PartialEq)]
pub struct RemarkRow {
    pub response_id: i32,
    pub remarks: String,
    pub timestamp: NaiveDateTime,
}

/// 응답 단위로 묶인 의견
#[derive(Debug, Clone, PartialEq)]
pub struct RemarkGroup {
    pub response_id: i32,
    pub remarks: String,
    pub count: usize,
    pub timestamps: Vec<NaiveDateTime>,
}

impl RemarkGroup {
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }
}

/// 빈 의견을 제외하고 응답 ID로 묶은 뒤 가장 이른 시각 순으로 정렬합니다.
///
/// 시각이 같으면 처음 나타난 순서를 유지합니다.
pub fn group_remarks(rows: Vec<RemarkRow>) -> Vec<RemarkGroup> {
    let mut groups: Vec<RemarkGroup> = Vec::new();
    let mut index: HashMap<i32, usize> = HashMap::new();

    for row in rows {
        if row.remarks.trim().is_empty() {
            continue;
        }

        match index.get(&row.response_id) {
            Some(&i) => {
                let group = &mut groups[i];
                group.count += 1;
                group.timestamps.push(row.timestamp);
            }
            None => {
                index.insert(row.response_id, groups.len());
                groups.push(RemarkGroup {
                    response_id: row.response_id,
                    remarks: row.remarks,
                    count: 1,
                    timestamps: vec![row.timestamp],
                });
            }
        }
    }

    for group in &mut groups {
        group.timestamps.sort();
    }
    groups.sort_by_key(|g| g.first_timestamp());
    groups
}
