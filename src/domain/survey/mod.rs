pub mod dto;
pub mod entity;
pub mod handler;
pub mod repository;
pub mod service;

/// 설문 선택 화면 경로 (잘못된 설문 접근 시 이동)
pub const SELECTION_PATH: &str = "/api/v1/surveys/selection";

pub use service::SurveyService;
