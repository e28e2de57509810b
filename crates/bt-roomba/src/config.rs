//! Driver configuration, loaded from YAML.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use bt_core::BlackboardConfig;
use serde::{Deserialize, Serialize};

/// Everything the driver needs to seed and run the robot without prompting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoombaConfig {
    /// Number of control cycles to run
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    /// Initial blackboard state
    #[serde(default)]
    pub blackboard: BlackboardConfig,

    /// Requested charge for each `Dock` run; the last value repeats
    #[serde(default = "default_charge")]
    pub charge: Vec<u32>,

    /// Upper bound on general-cleaning loop iterations per cycle
    #[serde(default = "default_until_fail_cap")]
    pub until_fail_cap: Option<u32>,

    /// Wait in real time for simulated work instead of returning immediately
    #[serde(default)]
    pub realtime: bool,

    /// Blackboard changes applied between cycles
    #[serde(default)]
    pub updates: Vec<CycleUpdate>,
}

/// Blackboard overrides applied once the given cycle has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleUpdate {
    /// 1-based cycle after which the update applies; 0 is rejected on load
    pub after_cycle: u32,

    #[serde(default)]
    pub flags: BTreeMap<String, bool>,

    #[serde(default)]
    pub battery_level: Option<i64>,
}

fn default_cycles() -> u32 {
    1
}
fn default_charge() -> Vec<u32> {
    vec![100]
}
fn default_until_fail_cap() -> Option<u32> {
    Some(1000)
}

impl Default for RoombaConfig {
    fn default() -> Self {
        Self {
            cycles: default_cycles(),
            blackboard: BlackboardConfig::default(),
            charge: default_charge(),
            until_fail_cap: default_until_fail_cap(),
            realtime: false,
            updates: Vec::new(),
        }
    }
}

impl RoombaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load `path` if given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject updates that could never apply.
    pub fn validate(&self) -> Result<()> {
        for update in &self.updates {
            ensure!(
                update.after_cycle >= 1,
                "update after_cycle must be at least 1 (cycles are numbered from 1)"
            );
        }
        Ok(())
    }

    /// Updates scheduled after `cycle`
    pub fn updates_after(&self, cycle: u32) -> impl Iterator<Item = &CycleUpdate> {
        self.updates.iter().filter(move |u| u.after_cycle == cycle)
    }
}
