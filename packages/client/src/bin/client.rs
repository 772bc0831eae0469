//! Interactive realtime client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parley-client -- --username alice chat --to bob
//! cargo run --bin parley-client -- --username alice game
//! ```

use clap::Parser;
use parley_client::ClientArgs;
use parley_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    setup_logger(env!("CARGO_BIN_NAME"), "info");

    if let Err(e) = parley_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
