pub mod dto;
pub mod handler;
pub mod repository;
pub mod service;

/// 응답 완료 화면 경로
pub const THANK_YOU_PATH: &str = "/thank-you";
