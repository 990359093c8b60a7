pub mod app;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod ui;

pub use app::router;
pub use client::BackendClient;
pub use config::Config;
pub use state::AppState;
