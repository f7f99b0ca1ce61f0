//! UI 層: axum ルーター、WebSocket 接続（Connection Adapter）、HTTP エンドポイント

mod config;
mod handler;
mod server;
mod signal;
pub mod state;

pub use config::ServerConfig;
pub use server::Server;
