use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use filevault::{
    AppState, Config, Database, FileStorage, KeyValueStore, MemoryKvStore, SessionBackend,
    SessionManager, SqliteKvStore, WebServer,
};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = if Path::new(CONFIG_PATH).exists() {
        match Config::load_with_env(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {CONFIG_PATH}: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = filevault::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        filevault::logging::init_console_only(&config.logging.level);
    }

    info!("filevault starting");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, path = %config.database.path, "Failed to open database");
            return ExitCode::FAILURE;
        }
    };
    if !db.is_alive().await {
        error!("Database is not ready");
        return ExitCode::FAILURE;
    }

    let store: Arc<dyn KeyValueStore> = match config.session.backend {
        SessionBackend::Database => Arc::new(SqliteKvStore::new(db.pool().clone())),
        SessionBackend::Memory => {
            warn!("Sessions are kept in memory and will not survive a restart");
            Arc::new(MemoryKvStore::new())
        }
    };
    if !store.is_alive().await {
        error!(backend = store.backend_name(), "Key-value store is not ready");
        return ExitCode::FAILURE;
    }

    let sessions = Arc::new(SessionManager::with_ttl(
        store,
        Duration::from_secs(config.session.ttl_secs),
    ));
    let storage = FileStorage::new(&config.files.storage_path);
    info!(
        storage = %config.files.storage_path,
        session_backend = ?config.session.backend,
        "Stores ready"
    );

    let server = match WebServer::new(&config, AppState::new(db, sessions, storage)) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Failed to configure web server");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!(error = %e, "Web server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
