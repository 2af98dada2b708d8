//! Daemon configuration.
//!
//! Sources, later wins:
//! 1. built-in defaults
//! 2. `config.json` in the data directory (missing file is fine)
//! 3. command-line flags (`--addr`, `--frame-delay-ms`, `--logo`)

use crate::error::DaemonError;
use quaytwin::protocol::DEFAULT_ADDR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const MIN_FRAME_DELAY_MS: u64 = 10;
pub const MAX_FRAME_DELAY_MS: u64 = 1_000;

fn default_frame_delay_ms() -> u64 {
    50
}

fn default_logo_path() -> PathBuf {
    PathBuf::from("apm_logo.png")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Pause between the end of one render cycle and the start of the next.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,
}

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            frame_delay_ms: default_frame_delay_ms(),
            logo_path: default_logo_path(),
        }
    }
}

impl DaemonConfig {
    pub fn load(path: &Path) -> Result<Self, DaemonError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let cfg: DaemonConfig = serde_json::from_str(&text)
            .map_err(|e| DaemonError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(cfg)
    }

    pub fn apply_args<I>(&mut self, args: I) -> Result<(), DaemonError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| DaemonError::Config(format!("{flag} needs a value")))
            };
            match flag.as_str() {
                "--addr" => self.addr = value()?,
                "--frame-delay-ms" => {
                    let v = value()?;
                    self.frame_delay_ms = v.parse().map_err(|_| {
                        DaemonError::Config(format!("--frame-delay-ms: not a number: {v}"))
                    })?;
                }
                "--logo" => self.logo_path = PathBuf::from(value()?),
                other => return Err(DaemonError::Config(format!("unknown flag: {other}"))),
            }
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms.clamp(MIN_FRAME_DELAY_MS, MAX_FRAME_DELAY_MS))
    }
}
