use std::sync::Arc;

use axum::{extract::Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::Environment;
use crate::services::ServiceLayerClient;
use crate::session::{SessionStore, SESSION_COOKIE};
use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;

use super::require_session;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(custom(function = validate_environment))]
    pub environment: String,
    #[validate(length(min = 1, message = "Please select a database"))]
    pub database: String,
}

// Fields in declared order, so validation failures always name the first
// invalid one.
const LOGIN_FIELDS: [&str; 4] = ["username", "password", "environment", "database"];

fn validate_environment(value: &str) -> Result<(), ValidationError> {
    if Environment::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("environment");
    err.message = Some("Please select a database environment".into());
    Err(err)
}

fn first_invalid_field(errors: &ValidationErrors) -> String {
    let by_field = errors.field_errors();
    for field in LOGIN_FIELDS {
        if let Some(error) = by_field.get(field).and_then(|list| list.first()) {
            return error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
        }
    }
    "Invalid login request".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub username: String,
    pub environment: Environment,
    pub timeout_minutes: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub environment: Environment,
    pub timeout_minutes: i64,
    pub time_remaining_minutes: i64,
}

pub async fn login(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
    Extension(gateway): Extension<Arc<ServiceLayerClient>>,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginData>>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(first_invalid_field(&e)))?;
    let environment = Environment::parse(&request.environment)
        .ok_or_else(|| ApiError::Validation("Please select a database environment".to_string()))?;

    info!(
        "Login attempt for {} against {}",
        request.username, request.database
    );

    let session = gateway
        .login(&request.username, &request.password, &request.database, environment)
        .await?;
    store.put(session.clone());

    let cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::minutes(session.timeout_minutes))
        .build();

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(LoginData {
            token: session.token,
            username: session.username,
            environment: session.environment,
            timeout_minutes: session.timeout_minutes,
        })),
    ))
}

pub async fn logout(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
) -> (CookieJar, Json<ApiResponse<()>>) {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let jar = match token {
        Some(token) => {
            store.remove(&token);
            info!("Session logged out");
            jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
        }
        None => jar,
    };
    (jar, Json(ApiResponse::ok_empty()))
}

pub async fn session_check(
    jar: CookieJar,
    Extension(store): Extension<Arc<SessionStore>>,
) -> Result<Json<ApiResponse<SessionData>>, ApiError> {
    let session = require_session(&jar, &store)?;
    Ok(Json(ApiResponse::ok(SessionData {
        time_remaining_minutes: session.minutes_remaining(),
        token: session.token,
        username: session.username,
        environment: session.environment,
        timeout_minutes: session.timeout_minutes,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, environment: &str, database: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            environment: environment.to_string(),
            database: database.to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request("manager", "secret", "HANA", "TESTDB").validate().is_ok());
    }

    #[test]
    fn empty_username_reported_first() {
        let errors = request("", "", "bogus", "").validate().unwrap_err();
        assert_eq!(first_invalid_field(&errors), "Username is required");
    }

    #[test]
    fn bad_environment_reported_when_credentials_present() {
        let errors = request("manager", "secret", "ORACLE", "TESTDB")
            .validate()
            .unwrap_err();
        assert_eq!(
            first_invalid_field(&errors),
            "Please select a database environment"
        );
    }

    #[test]
    fn missing_database_reported_last() {
        let errors = request("manager", "secret", "MSSQL", "")
            .validate()
            .unwrap_err();
        assert_eq!(first_invalid_field(&errors), "Please select a database");
    }
}
