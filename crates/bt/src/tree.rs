use std::fmt::Write as _;

use bt_core::{
    ActivityLog, Blackboard, BtNode, BtStatus, BuildError, Clock, NodeId, NodeKind, NullClock,
    TickContext,
};

/// Owns a root node and the blackboard it runs against.
///
/// Built once with [`BehaviorTree::build`], then driven by calling [`BehaviorTree::run_cycle`]
/// once per control cycle. Every cycle starts fresh from the root.
pub struct BehaviorTree {
    root: Box<dyn BtNode>,
    blackboard: Blackboard,
    clock: Box<dyn Clock>,
    cycles: u64,
    last: Option<BtStatus>,
}

impl BehaviorTree {
    /// Number the nodes in pre-order and validate the structure.
    ///
    /// Fails on a composite without children or a decorator with invalid parameters.
    pub fn build(mut root: Box<dyn BtNode>, blackboard: Blackboard) -> Result<Self, BuildError> {
        let mut next = 0u32;
        assign_ids(root.as_mut(), &mut next);
        validate(root.as_ref())?;
        tracing::debug!(nodes = next, root = root.name(), "behavior tree built");

        Ok(Self {
            root,
            blackboard,
            clock: Box::new(NullClock),
            cycles: 0,
            last: None,
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Run one traversal from the root using the tree's own clock.
    pub fn run_cycle(&mut self) -> BtStatus {
        self.cycles += 1;
        let status = run_root(
            self.root.as_mut(),
            &mut self.blackboard,
            self.cycles,
            self.clock.as_mut(),
        );
        self.last = Some(status);
        status
    }

    /// Run one traversal with a caller-provided clock instead of the tree's own.
    pub fn run_cycle_with_clock(&mut self, clock: &mut dyn Clock) -> BtStatus {
        self.cycles += 1;
        let status = run_root(self.root.as_mut(), &mut self.blackboard, self.cycles, clock);
        self.last = Some(status);
        status
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    /// Hand the accumulated activity log to the caller and continue with an empty one.
    pub fn take_log(&mut self) -> ActivityLog {
        let (blackboard, log) = std::mem::take(&mut self.blackboard).split_log();
        self.blackboard = blackboard;
        log
    }

    pub fn into_blackboard(self) -> Blackboard {
        self.blackboard
    }

    pub fn root(&self) -> &dyn BtNode {
        self.root.as_ref()
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles
    }

    pub fn last_status(&self) -> Option<BtStatus> {
        self.last
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        count_nodes(self.root.as_ref(), &mut count);
        count
    }

    /// Indented listing of the tree, one node per line, in execution order.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        write_outline(self.root.as_ref(), 0, &mut out);
        out
    }
}

fn run_root(
    root: &mut dyn BtNode,
    blackboard: &mut Blackboard,
    cycle: u64,
    clock: &mut dyn Clock,
) -> BtStatus {
    blackboard.push_log(format!("CYCLE: {cycle}"));
    blackboard.push_log("-".repeat(27));
    let mark = blackboard.log().len();

    let mut ctx = TickContext::new(cycle, clock);
    let status = root.run(&mut ctx, blackboard);

    tracing::debug!(
        cycle,
        ?status,
        entries = blackboard.log().len().saturating_sub(mark),
        battery = blackboard.battery_level(),
        "cycle finished"
    );
    status
}

fn assign_ids(node: &mut dyn BtNode, next: &mut u32) {
    node.meta_mut().set_id(NodeId(*next));
    *next += 1;
    node.for_each_child_mut(&mut |child| assign_ids(child, next));
}

fn validate(node: &dyn BtNode) -> Result<(), BuildError> {
    node.validate()?;

    let mut children = 0usize;
    let mut first_err = None;
    node.for_each_child(&mut |child| {
        children += 1;
        if first_err.is_none() {
            first_err = validate(child).err();
        }
    });

    if node.meta().kind() == NodeKind::Composite && children == 0 {
        return Err(BuildError::EmptyComposite {
            name: node.name().to_string(),
            id: node.meta().id(),
        });
    }

    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn count_nodes(node: &dyn BtNode, count: &mut usize) {
    *count += 1;
    node.for_each_child(&mut |child| count_nodes(child, count));
}

fn write_outline(node: &dyn BtNode, depth: usize, out: &mut String) {
    let _ = writeln!(
        out,
        "{:indent$}{} [{}]",
        "",
        node.label(),
        node.meta().kind(),
        indent = depth * 2
    );
    node.for_each_child(&mut |child| write_outline(child, depth + 1, out));
}
