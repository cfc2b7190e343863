use clap::Parser;
use copytrade_dashboard_lib::config::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    copytrade_dashboard_lib::run(Cli::parse()).await?;
    Ok(())
}
