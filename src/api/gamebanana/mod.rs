pub mod client;
pub mod models;

pub use client::GameBananaClient;
pub use models::ApiError;
