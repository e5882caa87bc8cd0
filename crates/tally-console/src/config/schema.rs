use std::net::SocketAddr;

use serde::Deserialize;
use tally_core::error::{Result, TallyError};

/// Console listen address used when none is configured.
pub const DEFAULT_CONSOLE_ADDR: &str = "0.0.0.0:8126";
pub const DEFAULT_PROMPT: &str = "console> ";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TallyConfig {
    pub version: u32,

    #[serde(default)]
    pub console: ConsoleSection,

    /// Ops HTTP surface; disabled when absent.
    #[serde(default)]
    pub ops: Option<OpsSection>,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            version: 1,
            console: ConsoleSection::default(),
            ops: None,
        }
    }
}

impl TallyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }
        self.console.validate()?;
        if let Some(ops) = &self.ops {
            ops.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleSection {
    /// Empty means the default address; `:port` binds all interfaces.
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            prompt: default_prompt(),
        }
    }
}

impl ConsoleSection {
    pub fn validate(&self) -> Result<()> {
        if self.prompt.is_empty() {
            return Err(TallyError::BadRequest("console.prompt must not be empty".into()));
        }
        if self.prompt.contains(['\n', '\r']) {
            return Err(TallyError::BadRequest(
                "console.prompt must be a single line".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpsSection {
    pub listen: String,
}

impl OpsSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            TallyError::BadRequest(format!("ops.listen must be a valid SocketAddr: {e}"))
        })?;
        Ok(())
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| TallyError::BadRequest(format!("ops.listen: {e}")))
    }
}

fn default_listen() -> String {
    DEFAULT_CONSOLE_ADDR.into()
}
fn default_prompt() -> String {
    DEFAULT_PROMPT.into()
}
