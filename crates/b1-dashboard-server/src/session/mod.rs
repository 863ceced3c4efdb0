pub mod store;

pub use store::{SessionStore, SweeperHandle};

/// Name of the HTTP-only cookie carrying the dashboard session token.
pub const SESSION_COOKIE: &str = "sap_session";
