//! Hiroba CLI chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --url ws://127.0.0.1:3001/ws
//! ```

use clap::Parser;
use hiroba_client::DEFAULT_URL;
use hiroba_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "hiroba-client", version, about = "CLI client for the Hiroba chat server")]
struct Args {
    /// WebSocket endpoint of the server
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    if let Err(e) = hiroba_client::run_client(&args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
