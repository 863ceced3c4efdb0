pub mod service_layer;

pub use service_layer::{DashboardCounts, ServiceLayerClient};
