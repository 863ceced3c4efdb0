use std::sync::Arc;

use axum::{extract::Extension, Json};
use axum_extra::extract::CookieJar;
use serde_json::Value;
use tracing::debug;

use crate::models::ResourceKind;
use crate::services::ServiceLayerClient;
use crate::session::SessionStore;
use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;

use super::require_session;

type ResourceReply = Result<Json<ApiResponse<Vec<Value>>>, ApiError>;

async fn list_resource(
    jar: CookieJar,
    store: Arc<SessionStore>,
    gateway: Arc<ServiceLayerClient>,
    kind: ResourceKind,
) -> ResourceReply {
    let session = require_session(&jar, &store)?;
    let records = gateway.fetch_resource(&session.token, kind).await?;
    debug!("Fetched {} {}", records.len(), kind.label());
    Ok(Json(ApiResponse::ok(records)))
}

pub async fn business_partners(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
) -> ResourceReply {
    list_resource(jar, store, gateway, ResourceKind::BusinessPartners).await
}

pub async fn items(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
) -> ResourceReply {
    list_resource(jar, store, gateway, ResourceKind::Items).await
}

pub async fn sales_orders(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
) -> ResourceReply {
    list_resource(jar, store, gateway, ResourceKind::SalesOrders).await
}

pub async fn locations(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
) -> ResourceReply {
    list_resource(jar, store, gateway, ResourceKind::Locations).await
}

pub async fn branches(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
) -> ResourceReply {
    list_resource(jar, store, gateway, ResourceKind::Branches).await
}

pub async fn warehouses(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
) -> ResourceReply {
    list_resource(jar, store, gateway, ResourceKind::Warehouses).await
}
