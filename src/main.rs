use std::path::PathBuf;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use graphql_docs_lsp::{Backend, EXPLORE_METHOD, LaunchOptions};

/// GraphQL schema documentation language server.
///
/// Speaks LSP over stdin/stdout.  Logs go to stderr.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the workspace/user config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Introspection JSON file; overrides the config's `schema`.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `graphql_docs_lsp=trace`.  Falls back
    /// to `RUST_LOG`, then `info`.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let options = LaunchOptions {
        config: cli.config,
        schema: cli.schema,
    };

    let (service, socket) = LspService::build(|client| Backend::new(client, options))
        .custom_method(EXPLORE_METHOD, Backend::explore)
        .finish();
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
