mod cli;

use std::io::Read;
use std::path::Path;

use arrivals_proxy::{
    api,
    config::Config,
    gateway::{PredictionSource, RedClient},
    observability,
    predictions::{UpstreamDocument, serialize},
};
use clap::Parser;
use cli::{Cli, Commands};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    observability::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            let mut config = Config::load()?;
            if let Some(address) = args.address {
                config.server.bind_addr = address;
            }
            api::run(config).await?
        }
        Commands::Arrivals(args) => {
            let config = Config::load()?;
            let client = RedClient::new(&config.upstream)?;
            let arrivals = client.next_arrivals(&args.stop_id).await?;
            println!("{}", serde_json::to_string_pretty(&arrivals)?);
        }
        Commands::Serialize(args) => {
            let raw = read_input(&args.input)?;
            let document: UpstreamDocument = serde_json::from_str(&raw)?;
            println!("{}", serde_json::to_string_pretty(&serialize(&document))?);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        std::fs::read_to_string(path)
    }
}
