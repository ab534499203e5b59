//! CLI command implementations

use anyhow::Result;
use rand::Rng;
use std::fs;
use std::path::Path;

use crate::api;
use crate::cli::{error, info, success, warn};
use crate::config::{self, loader::CONFIG_FILENAME};
use crate::db;

/// Initialize a new blogpad.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    let content = config::loader::default_config_content(&generate_secret_key());
    fs::write(config_path, content)?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'blogpad init-db' to create the database, then 'blogpad serve'");

    Ok(())
}

/// Create (or with `reset`, recreate) the database schema
pub async fn init_db(reset: bool) -> Result<()> {
    let config = config::load_config_or_default()?;
    let pool = db::connect(&config.database).await?;

    let result = if reset {
        db::reset_schema(&pool).await
    } else {
        db::init_schema(&pool).await
    };

    match result {
        Ok(()) => {
            success(&format!(
                "Initialized the database at {}",
                config.database.path.display()
            ));
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to initialize the database: {}", e));
            Err(e.into())
        }
    }
}

/// Start the web server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = config::load_config_or_default()?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    info(&format!("Starting blogpad on http://{}", config.bind_addr()));
    api::run_server(config).await?;
    Ok(())
}

/// 32 random bytes, hex encoded
fn generate_secret_key() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
