pub mod admin_service;
pub mod draw_service;
pub mod draw_strategy;
pub mod probability;
pub mod user_service;

pub use admin_service::*;
pub use draw_service::*;
pub use draw_strategy::*;
pub use user_service::*;
