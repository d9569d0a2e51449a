pub mod in_memory;
pub mod localization;
pub mod standalone_platform;

pub use in_memory::{InMemoryOrderRepository, InMemoryWebhookRepository};
pub use localization::DashboardLocalization;
pub use standalone_platform::StandalonePlatform;
