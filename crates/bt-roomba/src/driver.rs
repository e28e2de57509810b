//! Runs the robot tree for a configured number of cycles.

use anyhow::{Context, Result};
use bt::BehaviorTree;
use bt_core::{ActivityLog, Blackboard, BtStatus, BuildError, Clock};

use crate::agent::{build_tree, ChargeSchedule};
use crate::config::{CycleUpdate, RoombaConfig};

/// What a driver run produced.
#[derive(Debug)]
pub struct DriverReport {
    /// Root status per cycle, in order
    pub statuses: Vec<BtStatus>,
    pub blackboard: Blackboard,
}

impl DriverReport {
    pub fn log(&self) -> &ActivityLog {
        self.blackboard.log()
    }
}

/// Build the robot tree over a blackboard seeded from `config`.
pub fn build(config: &RoombaConfig) -> Result<BehaviorTree, BuildError> {
    let blackboard = Blackboard::from_config(&config.blackboard);
    let root = build_tree(
        ChargeSchedule::new(config.charge.clone()),
        config.until_fail_cap,
    );
    BehaviorTree::build(root, blackboard)
}

pub fn run_driver(config: &RoombaConfig, clock: &mut dyn Clock) -> Result<DriverReport> {
    let mut tree = build(config).context("Failed to build behavior tree")?;
    tracing::info!(
        cycles = config.cycles,
        battery = tree.blackboard().battery_level(),
        "Starting roomba"
    );

    let mut statuses = Vec::with_capacity(config.cycles as usize);
    for cycle in 1..=config.cycles {
        let status = tree.run_cycle_with_clock(clock);
        tracing::info!(
            cycle,
            ?status,
            battery = tree.blackboard().battery_level(),
            "Cycle complete"
        );
        statuses.push(status);

        if cycle < config.cycles {
            for update in config.updates_after(cycle) {
                apply_update(tree.blackboard_mut(), update);
            }
        }
    }

    Ok(DriverReport {
        statuses,
        blackboard: tree.into_blackboard(),
    })
}

fn apply_update(blackboard: &mut Blackboard, update: &CycleUpdate) {
    let mut changes = Vec::new();
    for (name, value) in &update.flags {
        blackboard.set_flag_named(name.clone(), *value);
        changes.push(format!("{name}={value}"));
    }
    if let Some(level) = update.battery_level {
        blackboard.set_battery_level(level);
        changes.push(format!("battery={}", blackboard.battery_level()));
    }

    if !changes.is_empty() {
        tracing::debug!(after_cycle = update.after_cycle, "Applying blackboard update");
        blackboard.push_log(format!("UPDATE: {}", changes.join(", ")));
    }
}
