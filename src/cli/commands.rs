//! CLI command implementations
//!
//! `init` prepares the config file and the books table, `serve` runs the
//! HTTP API until interrupted. The store is opened explicitly at startup and
//! closed after the server has drained.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::books::{BookService, BookStore, MemoryBookStore, SqliteBookStore};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file; empty keeps books in memory only
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> String {
    "./bookshelf.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }
        if self.http.host.is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }
        Ok(())
    }

    /// Open the configured book store
    pub fn open_store(&self) -> CliResult<Arc<dyn BookStore>> {
        if self.database_path.is_empty() {
            return Ok(Arc::new(MemoryBookStore::new()));
        }
        Ok(Arc::new(SqliteBookStore::open(&self.database_path)?))
    }
}

/// Parse CLI arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Write a default config file if none exists, then create the books table.
///
/// A freshly written config points at `bookshelf.db` next to the config file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if !config_path.exists() {
        let defaults = Config {
            database_path: config_path
                .with_file_name("bookshelf.db")
                .display()
                .to_string(),
            ..Default::default()
        };
        let content = serde_json::to_string_pretty(&defaults)?;
        fs::write(config_path, content)?;
        let path = config_path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("created", &path)]);
    }

    let config = Config::load(config_path)?;
    let store = config.open_store()?;
    log_event_with_fields(Event::StoreOpened, &[("database_path", &config.database_path)]);
    store.close()?;

    Ok(())
}

/// Serve the book API until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("database_path", &config.database_path),
            ("addr", &config.http.socket_addr()),
        ],
    );

    let store = config.open_store()?;
    log_event_with_fields(Event::StoreOpened, &[("database_path", &config.database_path)]);

    let server = HttpServer::new(config.http.clone(), BookService::new(store.clone()));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let served = rt
        .block_on(server.start(shutdown_signal()))
        .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)));

    // Close the store even when serving failed
    let closed = store.close();
    log_event(Event::ShutdownComplete);

    served?;
    closed?;
    Ok(())
}

async fn shutdown_signal() {
    // If the signal handler cannot be installed, serve until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    log_event(Event::ShutdownStart);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::BookFilter;
    use crate::cli::errors::CliErrorCode;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database_path, "./bookshelf.db");
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_config_rejects_port_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bookshelf.json");
        fs::write(&path, r#"{"http": {"port": 0}}"#).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn test_empty_database_path_uses_memory_store() {
        let config = Config {
            database_path: String::new(),
            ..Default::default()
        };
        let store = config.open_store().unwrap();
        assert!(store.find_all(BookFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_init_creates_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("books.db");
        let config_path = temp_dir.path().join("bookshelf.json");
        let config = Config {
            database_path: db_path.display().to_string(),
            ..Default::default()
        };
        fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

        init(&config_path).unwrap();
        assert!(db_path.exists());

        let store = SqliteBookStore::open(&db_path).unwrap();
        assert!(store.find_all(BookFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_init_creates_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bookshelf.json");

        init(&config_path).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.http, HttpServerConfig::default());
        assert_eq!(
            PathBuf::from(&config.database_path),
            temp_dir.path().join("bookshelf.db")
        );
        assert!(temp_dir.path().join("bookshelf.db").exists());
    }
}
