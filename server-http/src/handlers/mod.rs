pub mod admin;
pub mod auth;
pub mod health;
pub mod network;
pub mod payments;
pub mod premium;
pub mod webhooks;

pub use admin::{create_user, get_user, grant_node_access, list_users, set_tier};
pub use auth::{login, logout};
pub use health::health_check;
pub use network::{
    centralities, fee_market_overview, historical, network_graph, network_summary, test_connection,
};
pub use payments::get_payment;
pub use premium::{
    configure_alert, fee_recommendations, growth_prediction, node_centrality, node_history,
    node_liquidity, node_stats, optimize_node,
};
pub use webhooks::{delete_webhook, incoming_webhook, list_webhooks, register_webhook};
