use std::sync::Arc;

use crate::config::AppConfig;
use crate::utils::auth::Authenticator;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub authenticator: Arc<dyn Authenticator>,
}
