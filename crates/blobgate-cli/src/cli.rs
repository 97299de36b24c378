use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "blobgate",
    about = "Keyed JSON record store over a blob backend",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP record endpoint
    Serve(ServeArgs),
    /// Store a JSON record from a file (or `-` for stdin)
    Put(PutArgs),
    /// Print the record stored under an id (`--format json` prints the stored bytes verbatim)
    Get(GetArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the listen address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Persist records under this directory instead of the configured backend
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Options shared by the offline `put` and `get` commands.
#[derive(Args)]
pub struct StoreArgs {
    /// Directory holding the filesystem blob store
    #[arg(long, default_value = "./blobgate-data")]
    pub data_dir: PathBuf,
    #[arg(long, default_value = blobgate_gateway::DEFAULT_NAMESPACE)]
    pub namespace: String,
    /// Document field carrying the record id
    #[arg(long, default_value = blobgate_gateway::DEFAULT_ID_FIELD)]
    pub id_field: String,
}

#[derive(Args)]
pub struct PutArgs {
    pub file: PathBuf,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct GetArgs {
    pub id: String,
    #[command(flatten)]
    pub store: StoreArgs,
}
