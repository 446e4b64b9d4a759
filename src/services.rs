pub mod auth;
pub use auth::SessionService;
pub mod order_service;
pub use order_service::OrderService;
