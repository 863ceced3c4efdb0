pub mod resource;
pub mod session;

pub use resource::ResourceKind;
pub use session::{format_time_remaining, Environment, Session};
