//! Relay server for Parley game and chat clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parley-server -- --port 3000
//! ```

use clap::Parser;
use parley_server::ServerArgs;
use parley_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = parley_server::run_server(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
