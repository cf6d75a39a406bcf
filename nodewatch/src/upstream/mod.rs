pub mod alby;
pub mod stats_client;

pub use alby::AlbyWebhookProvider;
pub use stats_client::HttpStatsUpstream;
