//! 설문 통계 PDF 리포트
//!
//! 집계 결과를 먼저 [`ReportContent`]로 옮긴 뒤 `genpdf`로 그립니다.

use std::path::Path;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::NaiveDateTime;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::{style, Element};
use tracing::warn;

use super::service::SurveyStatistics;
use crate::utils::error::AppError;
use crate::utils::format::{encode_ext_value, format_timestamp, sanitize_filename};

/// 리포트에 들어갈 내용
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContent {
    pub title: String,
    pub department: String,
    pub description: String,
    pub period: String,
    pub generated_at: String,
    pub total_responses: u64,
    pub questions: Vec<ReportQuestionRow>,
    pub remarks: Vec<ReportRemark>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuestionRow {
    pub question_text: String,
    pub counts: Vec<u64>,
    pub average: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRemark {
    pub submitted_at: String,
    pub remarks: String,
}

impl ReportContent {
    /// 의견은 페이지 나누기 없이 모두 포함합니다.
    pub fn build(stats: &SurveyStatistics, generated_at: NaiveDateTime) -> Self {
        let questions = stats
            .questions
            .iter()
            .map(|q| ReportQuestionRow {
                question_text: q.question_text.clone(),
                counts: q.histogram.iter().map(|(_, count)| count).collect(),
                average: q
                    .histogram
                    .average()
                    .map(|avg| format!("{:.2}", avg))
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        let remarks = stats
            .remarks
            .iter()
            .map(|group| ReportRemark {
                submitted_at: group
                    .first_timestamp()
                    .map(|ts| format_timestamp(&ts))
                    .unwrap_or_default(),
                remarks: group.remarks.clone(),
            })
            .collect();

        Self {
            title: format!("{} - Survey Report", stats.survey.name),
            department: stats
                .survey
                .department_name
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            description: stats.survey.description.clone(),
            period: stats.range.describe(),
            generated_at: format_timestamp(&generated_at),
            total_responses: stats.total_responses,
            questions,
            remarks,
        }
    }
}

/// `<설문 이름>_report.pdf`
pub fn report_filename(survey_name: &str) -> String {
    let name = survey_name.trim();
    format!("{}_report.pdf", if name.is_empty() { "survey" } else { name })
}

/// PDF 응답 헤더 (다운로드 또는 브라우저 표시)
///
/// `filename`에는 ASCII로 정리한 이름을, `filename*`에는 UTF-8 원래 이름을 넣습니다.
pub fn report_headers(filename: &str, inline: bool) -> Result<HeaderMap, AppError> {
    let disposition = format!(
        "{}; filename=\"{}\"; filename*=UTF-8''{}",
        if inline { "inline" } else { "attachment" },
        sanitize_filename(filename),
        encode_ext_value(filename)
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::internal_error(format!("잘못된 파일명 헤더: {}", e)))?,
    );
    Ok(headers)
}

/// 폰트 패밀리 로딩
///
/// 전체 패밀리(Regular/Bold/Italic/BoldItalic)가 없으면 Regular 하나로 대체합니다.
fn load_font_family(font_dir: &str, family: &str) -> Result<FontFamily<FontData>, AppError> {
    match genpdf::fonts::from_files(font_dir, family, None) {
        Ok(fonts) => Ok(fonts),
        Err(full_err) => {
            warn!(
                "전체 폰트 패밀리 로딩 실패 ({}), Regular 폰트로 대체합니다.",
                full_err
            );
            let regular_path = Path::new(font_dir).join(format!("{}-Regular.ttf", family));
            let font_bytes = std::fs::read(&regular_path).map_err(|e| {
                AppError::PdfGenerationFailed(format!(
                    "Regular 폰트 파일 읽기 실패 ({}) : {}",
                    regular_path.display(),
                    e
                ))
            })?;

            let font = |bytes: Vec<u8>| {
                FontData::new(bytes, None).map_err(|e| {
                    AppError::PdfGenerationFailed(format!("폰트 데이터 로딩 실패: {}", e))
                })
            };

            Ok(FontFamily {
                regular: font(font_bytes.clone())?,
                bold: font(font_bytes.clone())?,
                italic: font(font_bytes.clone())?,
                bold_italic: font(font_bytes)?,
            })
        }
    }
}

/// PDF 문서 생성
pub fn render_pdf(
    content: &ReportContent,
    font_dir: &str,
    font_family: &str,
) -> Result<Vec<u8>, AppError> {
    let fonts = load_font_family(font_dir, font_family)?;

    let mut doc = genpdf::Document::new(fonts);
    doc.set_title(content.title.clone());
    doc.set_minimal_conformance();

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    let heading = || style::Style::new().bold().with_font_size(14);

    // ===== 제목 =====
    doc.push(
        Paragraph::new(content.title.clone())
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(Break::new(0.5));

    // ===== 기본 정보 =====
    doc.push(Paragraph::new("Basic Information").styled(heading()));
    doc.push(Break::new(0.3));
    doc.push(Paragraph::new(format!("Department: {}", content.department)));
    if !content.description.is_empty() {
        doc.push(Paragraph::new(format!("Description: {}", content.description)));
    }
    doc.push(Paragraph::new(format!("Period: {}", content.period)));
    doc.push(Paragraph::new(format!("Generated: {}", content.generated_at)));
    doc.push(Paragraph::new(format!(
        "Total Responses: {}",
        content.total_responses
    )));
    doc.push(Break::new(0.5));

    // ===== 질문별 별점 =====
    doc.push(Paragraph::new("Ratings by Question").styled(heading()));
    doc.push(Break::new(0.3));

    if content.questions.is_empty() {
        doc.push(Paragraph::new("  (No questions)"));
    } else {
        let mut table = TableLayout::new(vec![4, 1, 1, 1, 1, 1, 1]);
        table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let mut header_row = table
            .row()
            .element(Paragraph::new("Question").styled(style::Style::new().bold()));
        for value in 1..=5 {
            header_row.push_element(
                Paragraph::new(format!("{} pt", value)).styled(style::Style::new().bold()),
            );
        }
        header_row
            .element(Paragraph::new("Avg").styled(style::Style::new().bold()))
            .push()
            .map_err(|e| AppError::PdfGenerationFailed(format!("표 생성 실패: {}", e)))?;

        for question in &content.questions {
            let mut row = table
                .row()
                .element(Paragraph::new(question.question_text.clone()));
            for count in &question.counts {
                row.push_element(Paragraph::new(count.to_string()));
            }
            row.element(Paragraph::new(question.average.clone()))
                .push()
                .map_err(|e| AppError::PdfGenerationFailed(format!("표 생성 실패: {}", e)))?;
        }
        doc.push(table);
    }
    doc.push(Break::new(0.5));

    // ===== 의견 =====
    doc.push(Paragraph::new("Remarks").styled(heading()));
    doc.push(Break::new(0.3));

    if content.remarks.is_empty() {
        doc.push(Paragraph::new("  (No remarks)"));
    } else {
        for remark in &content.remarks {
            doc.push(
                Paragraph::new(format!("[{}]", remark.submitted_at))
                    .styled(style::Style::new().bold()),
            );
            doc.push(Paragraph::new(format!("  {}", remark.remarks)));
            doc.push(Break::new(0.2));
        }
    }

    // PDF 렌더링
    let mut buf = Vec::new();
    doc.render(&mut buf)
        .map_err(|e| AppError::PdfGenerationFailed(format!("PDF 렌더링 실패: {}", e)))?;

    Ok(buf)
}
