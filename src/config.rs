use std::num::NonZeroU64;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Run and debug settings, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    /// Step budget for a run; `None` runs until PC leaves the program.
    pub step_limit: Option<NonZeroU64>,
    /// Instruction indices armed as breakpoints when a debug session starts.
    pub breakpoints: Vec<u32>,
    /// Print the assembled listing before debugging.
    pub show_listing: bool,
}

impl VmConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid VM config")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text)
    }
}
