use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::Context;
use blobgate_gateway::{GatewayConfig, GatewayError, Lookup, RecordGateway};
use blobgate_server::{BackendConfig, BlobgateServer, SaveAck, ServerConfig};
use blobgate_store::FsBlobStore;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.verbose),
        Command::Put(args) => {
            init_tracing(if cli.verbose { "debug" } else { "warn" }, cli.verbose);
            cmd_put(args, &cli.format)
        }
        Command::Get(args) => {
            init_tracing(if cli.verbose { "debug" } else { "warn" }, cli.verbose);
            cmd_get(args, &cli.format)
        }
    }
}

/// `RUST_LOG` wins; otherwise `default_level` applies.
fn init_tracing(default_level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the server configuration: file, then command-line overrides.
fn serve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = &args.data_dir {
        config.backend = BackendConfig::Filesystem {
            root: dir.clone(),
            sync_writes: true,
        };
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let config = serve_config(&args)?;
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    init_tracing(level, verbose);
    tracing::debug!(?config, "resolved configuration");

    let server = BlobgateServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn open_gateway(args: &StoreArgs) -> anyhow::Result<RecordGateway> {
    let store = FsBlobStore::open(&args.data_dir)
        .with_context(|| format!("cannot open store at {}", args.data_dir.display()))?;
    let config = GatewayConfig::new(&args.namespace, args.id_field.clone())?;
    Ok(RecordGateway::new(Arc::new(store), config))
}

fn read_input(args: &PutArgs) -> anyhow::Result<Vec<u8>> {
    if args.file.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))
}

fn cmd_put(args: PutArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let raw = read_input(&args)?;
    let gateway = open_gateway(&args.store)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let stored = match runtime.block_on(gateway.put(&raw)) {
        Ok(stored) => stored,
        Err(GatewayError::MissingIdentifier { field }) => {
            anyhow::bail!("record has no '{field}' field");
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&SaveAck::new(stored.id.as_str()))?),
        OutputFormat::Text => println!(
            "{} Saved {} in {}",
            "✓".green().bold(),
            stored.id.as_str().yellow(),
            args.store.data_dir.display().to_string().bold()
        ),
    }
    Ok(())
}

/// `json` yields the stored bytes untouched; `text` pretty-prints them.
fn render_record(payload: &[u8], format: &OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Json => payload.to_vec(),
        OutputFormat::Text => serde_json::from_slice::<serde_json::Value>(payload)
            .and_then(|value| serde_json::to_vec_pretty(&value))
            .unwrap_or_else(|_| payload.to_vec()),
    }
}

fn cmd_get(args: GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let gateway = open_gateway(&args.store)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match runtime.block_on(gateway.get(&args.id))? {
        Lookup::Found(payload) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&render_record(&payload, format))?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
        Lookup::NotFound => anyhow::bail!("no record '{}' in namespace {}", args.id, args.store.namespace),
    }
}
