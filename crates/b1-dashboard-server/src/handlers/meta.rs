use std::sync::Arc;

use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::config::Settings;
use crate::models::Environment;
use crate::utils::response::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
    pub service_layer_url: String,
    pub default_user: String,
    pub supported_environments: Vec<&'static str>,
    pub session_timeout: i64,
    pub database_count: usize,
}

/// Company database entry as shown on the login screen.
#[derive(Debug, Serialize)]
pub struct DatabaseInfo {
    pub name: String,
    pub description: String,
    pub environment: String,
}

pub async fn config_info(
    Extension(settings): Extension<Arc<Settings>>,
) -> Json<ApiResponse<ConfigData>> {
    Json(ApiResponse::ok(ConfigData {
        service_layer_url: settings.service_layer.base_url.clone(),
        default_user: settings.credentials.default_user.clone(),
        supported_environments: Environment::SUPPORTED.to_vec(),
        session_timeout: settings.session.default_timeout_minutes,
        database_count: settings.databases.len(),
    }))
}

// Serves the login screen before any session exists, so no session check.
pub async fn databases(
    Extension(settings): Extension<Arc<Settings>>,
) -> Json<ApiResponse<Vec<DatabaseInfo>>> {
    let list = settings
        .databases
        .iter()
        .map(|db| DatabaseInfo {
            name: db.database.clone(),
            description: db.name.clone(),
            environment: db.environment().to_string(),
        })
        .collect();
    Json(ApiResponse::ok(list))
}
