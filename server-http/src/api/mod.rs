pub mod requests;
pub mod responses;

pub use requests::{
    AlertRequest, CreateUserRequest, GrantNodeRequest, GrowthPredictionParams, LoginRequest,
    RegisterWebhookRequest, SetTierRequest,
};
pub use responses::{
    ConnectionTestResponse, DeliveryResponse, ErrorResponse, HealthResponse, ListUsersResponse,
    ListWebhooksResponse, LoginResponse, LogoutResponse, UserResponse, WebhookEndpointResponse,
};
