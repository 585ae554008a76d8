use clap::Parser;
use recipe_wheel::{Cli, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    run(Cli::parse()).await
}
