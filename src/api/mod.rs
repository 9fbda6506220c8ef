/// API error types and handling
pub mod errors;
/// HTTP handlers, one per student endpoint
pub mod handlers;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
