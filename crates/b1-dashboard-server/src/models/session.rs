use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database environment a company database runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Hana,
    Mssql,
}

impl Environment {
    pub const SUPPORTED: [&'static str; 2] = ["HANA", "MSSQL"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "HANA" => Some(Environment::Hana),
            "MSSQL" => Some(Environment::Mssql),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Hana => "HANA",
            Environment::Mssql => "MSSQL",
        }
    }

    /// Maps a configured database engine type onto an environment tag.
    /// Engines outside the supported set are reported as `UNKNOWN`.
    pub fn classify_engine(engine: &str) -> &'static str {
        if engine == "HANADB" {
            "HANA"
        } else if engine.contains("MSSQL") {
            "MSSQL"
        } else {
            "UNKNOWN"
        }
    }
}

/// An authenticated Service Layer session cached by the dashboard.
///
/// The token is issued by the Service Layer on login and forwarded as the
/// `B1SESSION` cookie on every upstream call until `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub environment: Environment,
    pub version: String,
    pub timeout_minutes: i64,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whole minutes until expiry, rounded up. Never negative.
    pub fn minutes_remaining(&self) -> i64 {
        let seconds = (self.expires_at - Utc::now()).num_seconds();
        if seconds <= 0 {
            0
        } else {
            (seconds + 59) / 60
        }
    }
}

/// Renders a minute count as `H:MM` for the dashboard header clock.
pub fn format_time_remaining(minutes: i64) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
