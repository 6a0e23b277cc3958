mod repl;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use crate::repl::start_repl;

/// Serves a lispy REPL over TCP, one session per connection.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:2020")]
    addr: SocketAddr,

    /// Text sent before each input line.
    #[arg(long, default_value = "lispy> ")]
    prompt: String,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> std::io::Result<()> {
    init_tracing();
    let args = Args::parse();

    let listener = TcpListener::bind(args.addr).await?;
    let prompt: Arc<str> = Arc::from(args.prompt);

    tracing::info!(addr = %args.addr, "server listening");
    println!("Server listening on {}.", args.addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        let prompt = Arc::clone(&prompt);
        tokio::spawn(async move {
            tracing::debug!(%peer, "session started");
            if let Err(err) = start_repl(socket, &prompt).await {
                tracing::warn!(%peer, %err, "session ended with an error");
            }
        });
    }
}
