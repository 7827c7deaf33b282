pub mod api_client;
pub mod offline_service;

#[cfg(test)]
pub mod testing;

pub use api_client::{ApiClient, PortalApi};
pub use offline_service::OfflineService;
