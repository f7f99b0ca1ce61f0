//! Watch-party server.
//!
//! Keeps every client in a room on the same video timeline and relays chat.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin watchparty-server
//! cargo run --bin watchparty-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin watchparty-server -- --allowed-origin http://localhost:5173 --allowed-origin https://party.example
//! ```

use std::sync::Arc;

use clap::Parser;
use watchparty_server::{
    domain::SessionRegistry,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{Server, ServerConfig},
    usecase::{EventRouter, GetHealthUseCase, GetRoomsUseCase},
};
use watchparty_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "watchparty-server")]
#[command(about = "Watch party server: synchronized playback and chat over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,

    /// Origin allowed by CORS (repeatable)
    #[arg(long = "allowed-origin", default_value = "http://localhost:5173")]
    allowed_origins: Vec<String>,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory, empty at startup)
    let registry = SessionRegistry::new(Box::new(SystemClock));
    let repository = Arc::new(InMemoryRoomRepository::new(registry));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let event_router = Arc::new(EventRouter::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_health_usecase = Arc::new(GetHealthUseCase::new(repository.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository));

    // 4. Create and run the server
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        allowed_origins: args.allowed_origins,
    };
    let server = Server::new(event_router, get_health_usecase, get_rooms_usecase);
    if let Err(e) = server.run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
