//! Vacuum robot built on the `bt` behavior tree runtime.
//!
//! - [`agent`] defines the robot's flags, leaves and tree shape.
//! - [`config`] loads the driver configuration that replaces interactive prompts.
//! - [`driver`] runs the tree for a number of cycles and collects the activity log.

#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod driver;

pub use agent::{build_tree, ChargeSchedule};
pub use config::{CycleUpdate, RoombaConfig};
pub use driver::{run_driver, DriverReport};
