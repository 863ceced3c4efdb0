use chrono::Utc;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ServiceLayerConfig;
use crate::models::{Environment, ResourceKind, Session};
use crate::utils::error::ApiError;

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    #[serde(rename = "UserName")]
    user_name: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    #[serde(rename = "CompanyDB")]
    company_db: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(rename = "SessionId")]
    session_id: String,
    #[serde(rename = "Version", default)]
    version: Option<String>,
    #[serde(rename = "SessionTimeout", default)]
    session_timeout: Option<i64>,
}

/// OData list envelope; a missing `value` array means an empty result,
/// never an error.
#[derive(Debug, Deserialize)]
struct ListReply {
    #[serde(default)]
    value: Vec<Value>,
}

/// Best-effort entity counts for the dashboard tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_partners: i64,
    pub active_items: i64,
    pub open_orders: i64,
}

/// Gateway to the SAP B1 Service Layer.
///
/// Owns the single reqwest client (explicit timeout, optionally accepting
/// the self-signed certificates SAP instances ship with) and translates
/// dashboard requests into authenticated Service Layer calls.
pub struct ServiceLayerClient {
    client: Client,
    config: ServiceLayerConfig,
    default_session_timeout: i64,
}

impl ServiceLayerClient {
    pub fn new(
        config: ServiceLayerConfig,
        default_session_timeout: i64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            config,
            default_session_timeout,
        })
    }

    /// Authenticates against the Service Layer Login endpoint and returns
    /// the resulting session. A non-success status is an authentication
    /// failure carrying the upstream error text.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        database: &str,
        environment: Environment,
    ) -> Result<Session, ApiError> {
        let payload = LoginPayload {
            user_name: username,
            password,
            company_db: database,
        };

        let response = self
            .client
            .post(format!("{}/Login", self.config.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("Service Layer unreachable: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!("Authentication failed: {}", body)));
        }

        let reply: LoginReply = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("Malformed login reply: {}", e)))?;

        let timeout_minutes = reply.session_timeout.unwrap_or(self.default_session_timeout);
        debug!(
            "Service Layer login for {} ok, session valid {} minutes",
            username, timeout_minutes
        );

        Ok(Session {
            token: reply.session_id,
            username: username.to_string(),
            environment,
            version: reply.version.unwrap_or_default(),
            timeout_minutes,
            expires_at: Utc::now() + chrono::Duration::minutes(timeout_minutes),
        })
    }

    /// Lists one resource kind, forwarding the session token as the
    /// `B1SESSION` cookie. Records of kinds with a rename table are
    /// reshaped to the dashboard contract before being returned.
    pub async fn fetch_resource(
        &self,
        token: &str,
        kind: ResourceKind,
    ) -> Result<Vec<Value>, ApiError> {
        let mut url = format!("{}/{}?", self.config.base_url, kind.path());
        if let Some(select) = kind.select() {
            url.push_str(&format!("$select={}&", select));
        }
        url.push_str(&format!("$top={}", kind.page_size()));

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, format!("B1SESSION={}", token))
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("Service Layer unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status,
                message: format!("Failed to fetch {}: {}", kind.label(), body),
            });
        }

        let reply: ListReply = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("Malformed {} reply: {}", kind.label(), e)))?;

        let records = match kind.field_map() {
            Some(map) => reply.value.iter().map(|r| remap_record(r, map)).collect(),
            None => reply.value,
        };
        Ok(records)
    }

    /// Fetches the three dashboard counts concurrently. Counts are
    /// best-effort: a failing sub-count degrades to 0 instead of failing
    /// the whole call.
    pub async fn fetch_counts(&self, token: &str) -> DashboardCounts {
        let (partners, items, orders) = tokio::join!(
            self.count(token, ResourceKind::BusinessPartners),
            self.count(token, ResourceKind::Items),
            self.count(token, ResourceKind::SalesOrders),
        );

        DashboardCounts {
            total_partners: count_or_zero(partners, ResourceKind::BusinessPartners),
            active_items: count_or_zero(items, ResourceKind::Items),
            open_orders: count_or_zero(orders, ResourceKind::SalesOrders),
        }
    }

    async fn count(&self, token: &str, kind: ResourceKind) -> Result<i64, ApiError> {
        let url = format!("{}/{}/$count", self.config.base_url, kind.path());

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, format!("B1SESSION={}", token))
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("Service Layer unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status,
                message: format!("Failed to count {}: {}", kind.label(), body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Internal(format!("Malformed count reply: {}", e)))?;
        body.trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Internal(format!("Non-numeric {} count: {:?}", kind.label(), body)))
    }
}

fn count_or_zero(result: Result<i64, ApiError>, kind: ResourceKind) -> i64 {
    match result {
        Ok(count) => count,
        Err(e) => {
            warn!("{} count unavailable: {}", kind.label(), e);
            0
        }
    }
}

/// Projects a record through a rename table. Fields the upstream did not
/// send come through as null, matching the passthrough contract.
fn remap_record(record: &Value, map: &[(&str, &str)]) -> Value {
    let mut out = serde_json::Map::with_capacity(map.len());
    for (from, to) in map {
        out.insert(
            (*to).to_string(),
            record.get(*from).cloned().unwrap_or(Value::Null),
        );
    }
    Value::Object(out)
}
