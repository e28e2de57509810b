//! Behavior tree runtime built on `bt-core`.
//!
//! Composites decide how children are ordered and when traversal stops, decorators wrap a
//! single child, and leaves read or change the blackboard. [`BehaviorTree`] ties a root node to
//! its blackboard and runs one traversal per control cycle.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod tree;

pub use bt_core::{Blackboard, BtNode, BtStatus, BuildError, TickContext};
pub use composite::{Priority, Selection, Sequence};
pub use decorator::{LogicalNegation, Timer, UntilFail};
pub use leaf::{Charge, ChargeSource, Condition, FixedCharge, Task};
pub use tree::BehaviorTree;
