use std::sync::Arc;

use axum::{extract::Extension, Json};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::models::format_time_remaining;
use crate::services::ServiceLayerClient;
use crate::session::SessionStore;
use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;

use super::require_session;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_partners: i64,
    pub active_items: i64,
    pub open_orders: i64,
    pub session_time_remaining: String,
}

pub async fn dashboard_stats(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let session = require_session(&jar, &store)?;
    let counts = gateway.fetch_counts(&session.token).await;

    Ok(Json(ApiResponse::ok(DashboardStats {
        total_partners: counts.total_partners,
        active_items: counts.active_items,
        open_orders: counts.open_orders,
        session_time_remaining: format_time_remaining(session.minutes_remaining()),
    })))
}
