//! Deterministic behavior tree kernel primitives.
//!
//! This crate holds what every node agrees on: the status a node reports, the node contract
//! itself, and the blackboard all nodes of a tree share. Concrete composites, decorators and
//! leaves live in the `bt` crate.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod clock;
pub mod error;
pub mod log;
pub mod node;
pub mod status;
pub mod tick;

pub use blackboard::{
    Battery, Blackboard, BlackboardConfig, Flag, HomePath, DEFAULT_DRAIN, MAX_BATTERY,
};
pub use clock::{Clock, ManualClock, NullClock, SystemClock};
pub use error::BuildError;
pub use log::ActivityLog;
pub use node::{BtNode, NodeId, NodeKind, NodeMeta, NodeRef};
pub use status::BtStatus;
pub use tick::TickContext;
