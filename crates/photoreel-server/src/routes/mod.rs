//! HTTP routes.

pub mod auth;
pub mod health;
pub mod home;
pub mod photos;

pub use auth::{CallbackParams, SuccessResponse, callback_handler, login_handler, logout_handler, refresh_handler};
pub use health::{HealthResponse, SessionState, health_routes};
pub use home::home_handler;
pub use photos::{PhotosQuery, photos_handler};
