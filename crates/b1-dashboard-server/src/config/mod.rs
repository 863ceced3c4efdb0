pub mod settings;

pub use settings::{
    CredentialsConfig, DatabaseEntry, ServerConfig, ServiceLayerConfig, SessionConfig, Settings,
};
