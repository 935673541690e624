//! HTTP API handlers

mod health;
mod identity;
mod reviews;
mod showcases;
mod users;

pub use health::health_routes;
pub use identity::UserId;
pub use reviews::review_routes;
pub use showcases::showcase_routes;
pub use users::user_routes;
