pub mod aggregate;
pub mod dto;
pub mod filter;
pub mod handler;
pub mod report;
pub mod repository;
pub mod service;

pub use service::StatisticsService;
