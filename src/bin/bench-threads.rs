//! Concurrent benchmark backend: one task per connection.

use bench_backend::{cli, observability, ServerConfig, Variant};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::parse_or_exit(std::env::args_os());
    observability::init();

    bench_backend::run(Variant::Concurrent, ServerConfig::for_port(cli.port)).await?;
    Ok(())
}
