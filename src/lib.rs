use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tower_lsp::Client;

// ─── Module declarations ────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod explorer;
pub mod markup;
pub mod navigation;
pub mod overlay;
pub mod schema;
pub mod signature;
pub mod types;

mod completion;
mod explore;
mod server;
mod util;

// ─── Re-exports ─────────────────────────────────────────────────────────────

pub use completion::context::{CompletionContext, Step, extract_completion_context};
pub use config::Config;
pub use explore::{ExploreAction, ExploreParams, ExploreResponse};
pub use explorer::{DocExplorer, SchemaSlot, SchemaSource};
pub use navigation::{NavigationEntry, NavigationHistory};
pub use types::*;

/// The LSP method name of the explorer request.
pub const EXPLORE_METHOD: &str = "graphqlDocs/explore";

/// Startup options that come from the command line.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Explicit config file (`--config`).
    pub config: Option<PathBuf>,
    /// Schema file overriding the config (`--schema`).
    pub schema: Option<PathBuf>,
}

pub struct Backend {
    name: String,
    version: String,
    /// Text of open documents keyed by URI.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    /// Explicit config file path from the command line.
    config_path: Option<PathBuf>,
    /// Schema path from the command line or initialization options; takes
    /// precedence over the config file.
    schema_override: Arc<Mutex<Option<PathBuf>>>,
    config: Arc<Mutex<Config>>,
    schema: Arc<Mutex<SchemaSource>>,
    explorer: Arc<Mutex<DocExplorer>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client, options: LaunchOptions) -> Self {
        Self {
            client: Some(client),
            config_path: options.config,
            schema_override: Arc::new(Mutex::new(options.schema)),
            ..Self::new_test()
        }
    }

    /// A backend without a client, for tests.  The schema starts out
    /// pending, exactly as before `initialized`.
    pub fn new_test() -> Self {
        Self {
            name: "GraphQLDocsLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            config_path: None,
            schema_override: Arc::new(Mutex::new(None)),
            config: Arc::new(Mutex::new(Config::default())),
            schema: Arc::new(Mutex::new(SchemaSource::default())),
            explorer: Arc::new(Mutex::new(DocExplorer::new(NavigationHistory::new()))),
            client: None,
        }
    }

    /// A test backend with a schema already loaded.
    pub fn new_test_with_schema(schema: SchemaGraph) -> Self {
        let backend = Self::new_test();
        *backend.schema.lock() = SchemaSource::loaded(schema);
        backend
    }

    /// A test backend rooted in a workspace, so `initialized` reads the
    /// workspace config.
    pub fn new_test_with_workspace(root: PathBuf) -> Self {
        let backend = Self::new_test();
        *backend.workspace_root.lock() = Some(root);
        backend
    }
}
