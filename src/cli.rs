use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arrivals_proxy")]
#[command(about = "Next-arrivals proxy for red.cl bus predictions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
    /// Fetch and print the next arrivals for one stop
    Arrivals(ArrivalsArgs),
    /// Normalize a saved upstream prediction document
    Serialize(SerializeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[derive(clap::Args, Debug)]
pub struct ArrivalsArgs {
    /// Upstream stop code, e.g. PA433
    #[arg(value_name = "STOP_ID")]
    pub stop_id: String,
}

#[derive(clap::Args, Debug)]
pub struct SerializeArgs {
    /// Upstream JSON document, `-` reads stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,
}
