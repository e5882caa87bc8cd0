//! Console config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use tally_core::error::{Result, TallyError};

pub use schema::{ConsoleSection, OpsSection, TallyConfig, DEFAULT_CONSOLE_ADDR, DEFAULT_PROMPT};

/// Default config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "tally.yaml";

pub fn load_from_file(path: &str) -> Result<TallyConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TallyError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<TallyConfig> {
    let cfg: TallyConfig = serde_yaml::from_str(s)
        .map_err(|e| TallyError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Explicit path must exist; otherwise `tally.yaml` is used when present and
/// built-in defaults when not.
pub fn load(path: Option<&str>) -> Result<TallyConfig> {
    match path {
        Some(p) => load_from_file(p),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        None => {
            tracing::info!("no {DEFAULT_CONFIG_PATH} found, using built-in defaults");
            Ok(TallyConfig::default())
        }
    }
}
