//! Drought dashboard CLI. Set `RUST_LOG=info` to see load diagnostics.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "drought-cli",
    version,
    about = "District drought predictions for India, aggregated per state"
)]
struct Cli {
    #[command(subcommand)]
    command: drought_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("drought-cli {}", env!("CARGO_PKG_VERSION"));
    drought_cmd::run(cli.command).await
}
