pub mod health;
pub mod response;
pub mod statistics;
pub mod survey;
