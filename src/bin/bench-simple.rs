//! Blocking benchmark backend: one connection at a time.

use bench_backend::{cli, observability, ServerConfig, Variant};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::parse_or_exit(std::env::args_os());
    observability::init();

    bench_backend::run(Variant::Blocking, ServerConfig::for_port(cli.port)).await?;
    Ok(())
}
