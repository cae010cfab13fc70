pub mod client;
pub mod resilience;
pub mod http;

pub use client::StatsSource;
#[cfg(test)]
pub use client::MockStatsSource;
pub use resilience::{retry_with_backoff, RetryConfig};
pub use http::HttpStatsSource;
