//! Hiroba chat server.
//!
//! Assigns every WebSocket connection a generated profile and relays each
//! message to all connected clients, the sender included.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server -- --port 3001
//! ```

use clap::Parser;
use hiroba_server::ui::DEFAULT_PORT;
use hiroba_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "hiroba-server", version, about = "Single-room WebSocket chat server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = hiroba_server::run_server(args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
