pub mod auth;
pub mod client_ip;
pub mod error;
pub mod flash;
pub mod format;
pub mod jwt;
pub mod logging;
pub mod pagination;
pub mod response;

pub use response::BaseResponse;
pub use response::ErrorResponse;
