use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ActivityLog, BtStatus, NodeMeta, NodeRef};

pub const MAX_BATTERY: u8 = 100;
/// Battery cost of a drain when the caller does not name one.
pub const DEFAULT_DRAIN: u32 = 2;

/// Battery charge, always within `0..=MAX_BATTERY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Battery(u8);

impl Battery {
    /// Clamps `level` into range.
    pub fn new(level: i64) -> Self {
        let clamped = level.clamp(0, i64::from(MAX_BATTERY));
        Self(u8::try_from(clamped).unwrap_or(MAX_BATTERY))
    }

    pub const fn full() -> Self {
        Self(MAX_BATTERY)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Subtract `amount`, stopping at zero. Returns the new level.
    pub fn drain(&mut self, amount: u32) -> u8 {
        let remaining = u32::from(self.0).saturating_sub(amount);
        self.0 = u8::try_from(remaining).unwrap_or(0);
        self.0
    }

    /// Add up to `requested`, stopping at `MAX_BATTERY`. Returns the amount actually applied.
    pub fn charge(&mut self, requested: u32) -> u8 {
        let headroom = MAX_BATTERY - self.0;
        let applied = u8::try_from(requested.min(u32::from(headroom))).unwrap_or(headroom);
        self.0 += applied;
        applied
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Battery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Name of a boolean flag on the blackboard. Unset flags read as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flag(pub &'static str);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HomePath {
    #[default]
    Unknown,
    Planned,
    Home,
}

impl fmt::Display for HomePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HomePath::Unknown => "unknown",
            HomePath::Planned => "planned",
            HomePath::Home => "home",
        };
        f.write_str(s)
    }
}

/// Initial blackboard state, supplied by whatever drives the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlackboardConfig {
    /// Out-of-range values are clamped, not rejected.
    pub battery_level: i64,
    pub flags: BTreeMap<String, bool>,
    pub home_path: HomePath,
}

impl Default for BlackboardConfig {
    fn default() -> Self {
        Self {
            battery_level: i64::from(MAX_BATTERY),
            flags: BTreeMap::new(),
            home_path: HomePath::Unknown,
        }
    }
}

impl BlackboardConfig {
    pub fn with_battery(mut self, level: i64) -> Self {
        self.battery_level = level;
        self
    }

    pub fn with_flag(mut self, flag: Flag, value: bool) -> Self {
        self.flags.insert(flag.0.to_string(), value);
        self
    }
}

/// State shared by every node of one tree.
///
/// Battery changes go through `drain_battery` / `charge_battery`, which clamp and log; there is
/// no way to push the level out of range.
#[derive(Debug, Clone, Default)]
pub struct Blackboard {
    battery: Battery,
    flags: BTreeMap<String, bool>,
    home_path: HomePath,
    log: ActivityLog,
    running_node: Option<NodeRef>,
    failed_node: Option<NodeRef>,
    succeeded_node: Option<NodeRef>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &BlackboardConfig) -> Self {
        Self {
            battery: Battery::new(config.battery_level),
            flags: config.flags.clone(),
            home_path: config.home_path,
            ..Self::default()
        }
    }

    pub fn battery(&self) -> Battery {
        self.battery
    }

    pub fn battery_level(&self) -> u8 {
        self.battery.level()
    }

    /// Overwrite the level (clamped). Meant for drivers seeding state between cycles.
    pub fn set_battery_level(&mut self, level: i64) {
        self.battery = Battery::new(level);
    }

    pub fn drain_battery(&mut self, amount: u32) -> u8 {
        let level = self.battery.drain(amount);
        self.log.push(format!("BATTERY LEVEL: {level}"));
        level
    }

    pub fn drain_battery_default(&mut self) -> u8 {
        self.drain_battery(DEFAULT_DRAIN)
    }

    /// Charge by up to `requested`; returns what was applied after clamping at full.
    pub fn charge_battery(&mut self, requested: u32) -> u8 {
        let applied = self.battery.charge(requested);
        self.log
            .push(format!("CHARGED: {applied} (requested {requested})"));
        self.log
            .push(format!("BATTERY LEVEL: {}", self.battery.level()));
        applied
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.flag_named(flag.0)
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.insert(flag.0.to_string(), value);
    }

    pub fn flag_named(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set_flag_named(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    pub fn flags(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn home_path(&self) -> HomePath {
        self.home_path
    }

    pub fn set_home_path(&mut self, home_path: HomePath) {
        self.home_path = home_path;
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Append a line to the activity log. Entries are never removed through a borrowed
    /// blackboard.
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }

    /// Separate the log from the rest of the state, leaving an empty log behind.
    pub fn split_log(mut self) -> (Self, ActivityLog) {
        let log = std::mem::take(&mut self.log);
        (self, log)
    }

    pub fn running_node(&self) -> Option<&NodeRef> {
        self.running_node.as_ref()
    }

    pub fn failed_node(&self) -> Option<&NodeRef> {
        self.failed_node.as_ref()
    }

    pub fn succeeded_node(&self) -> Option<&NodeRef> {
        self.succeeded_node.as_ref()
    }

    /// Note that `node` has started. Used by composites, decorators and tasks on entry.
    pub fn record_running(&mut self, node: &NodeMeta) {
        tracing::trace!(node = node.name(), id = node.id().0, "enter");
        self.running_node = Some(node.to_ref());
        self.log.push(format!("RUNNING: {}", node.name()));
    }

    /// Note the final status of `node` and hand it back.
    ///
    /// `Running` only refreshes the running reference; the entry line was already written.
    pub fn record_outcome(&mut self, node: &NodeMeta, status: BtStatus) -> BtStatus {
        tracing::trace!(node = node.name(), id = node.id().0, ?status, "exit");
        match status {
            BtStatus::Running => {
                self.running_node = Some(node.to_ref());
            }
            BtStatus::Success => {
                self.succeeded_node = Some(node.to_ref());
                self.log.push(format!("SUCCESS: {}", node.name()));
            }
            BtStatus::Failure => {
                self.failed_node = Some(node.to_ref());
                self.log.push(format!("FAILED: {}", node.name()));
            }
        }
        status
    }
}
