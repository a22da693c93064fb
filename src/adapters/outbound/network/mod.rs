/// Network adapters for external API calls
mod snyk_client;

pub use snyk_client::{SnykClient, SnykConfig, DEFAULT_API_VERSION, DEFAULT_REGION};
