use bt_core::{Blackboard, BtNode, BtStatus, NodeKind, NodeMeta, TickContext};

/// Runs children left to right and stops at the first one that does not succeed.
///
/// - `Failure` from a child: the sequence fails; later children are not run.
/// - `Running` from a child: the sequence reports `Running`; later children are not run.
/// - Every child succeeds: the sequence succeeds.
pub struct Sequence {
    meta: NodeMeta,
    children: Vec<Box<dyn BtNode>>,
}

impl Sequence {
    pub fn new(children: Vec<Box<dyn BtNode>>) -> Self {
        Self::named("Sequence", children)
    }

    pub fn named(name: &'static str, children: Vec<Box<dyn BtNode>>) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Composite, name),
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl BtNode for Sequence {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        for child in self.children.iter_mut() {
            match child.run(ctx, blackboard) {
                BtStatus::Success => continue,
                status => return blackboard.record_outcome(&self.meta, status),
            }
        }
        blackboard.record_outcome(&self.meta, BtStatus::Success)
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(&dyn BtNode)) {
        for child in self.children.iter() {
            visit(child.as_ref());
        }
    }

    fn for_each_child_mut(&mut self, visit: &mut dyn FnMut(&mut dyn BtNode)) {
        for child in self.children.iter_mut() {
            visit(child.as_mut());
        }
    }
}

/// Runs every child, whatever each one reports, then succeeds if any of them succeeded.
///
/// There is no short-circuit: a success early in the list does not skip the rest. With no
/// success, the result is `Running` if some child is still running, otherwise `Failure`.
pub struct Selection {
    meta: NodeMeta,
    children: Vec<Box<dyn BtNode>>,
}

impl Selection {
    pub fn new(children: Vec<Box<dyn BtNode>>) -> Self {
        Self::named("Selection", children)
    }

    pub fn named(name: &'static str, children: Vec<Box<dyn BtNode>>) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Composite, name),
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl BtNode for Selection {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        let mut any_success = false;
        let mut any_running = false;
        for child in self.children.iter_mut() {
            match child.run(ctx, blackboard) {
                BtStatus::Success => any_success = true,
                BtStatus::Running => any_running = true,
                BtStatus::Failure => {}
            }
        }

        let status = if any_success {
            BtStatus::Success
        } else if any_running {
            BtStatus::Running
        } else {
            BtStatus::Failure
        };
        blackboard.record_outcome(&self.meta, status)
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(&dyn BtNode)) {
        for child in self.children.iter() {
            visit(child.as_ref());
        }
    }

    fn for_each_child_mut(&mut self, visit: &mut dyn FnMut(&mut dyn BtNode)) {
        for child in self.children.iter_mut() {
            visit(child.as_mut());
        }
    }
}

struct Prioritized {
    priority: i32,
    node: Box<dyn BtNode>,
}

/// Runs every child in ascending priority order and always succeeds.
///
/// Children are stable-sorted once at construction, so equal priorities keep their insertion
/// order. Child outcomes are ignored.
pub struct Priority {
    meta: NodeMeta,
    children: Vec<Prioritized>,
}

impl Priority {
    pub fn new(children: Vec<(Box<dyn BtNode>, i32)>) -> Self {
        Self::named("Priority", children)
    }

    pub fn named(name: &'static str, children: Vec<(Box<dyn BtNode>, i32)>) -> Self {
        let mut children: Vec<Prioritized> = children
            .into_iter()
            .map(|(node, priority)| Prioritized { priority, node })
            .collect();
        children.sort_by_key(|c| c.priority);
        Self {
            meta: NodeMeta::new(NodeKind::Composite, name),
            children,
        }
    }

    /// Priorities in execution order.
    pub fn priorities(&self) -> Vec<i32> {
        self.children.iter().map(|c| c.priority).collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl BtNode for Priority {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        for child in self.children.iter_mut() {
            let status = child.node.run(ctx, blackboard);
            tracing::trace!(priority = child.priority, ?status, "priority child finished");
        }
        blackboard.record_outcome(&self.meta, BtStatus::Success)
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(&dyn BtNode)) {
        for child in self.children.iter() {
            visit(child.node.as_ref());
        }
    }

    fn for_each_child_mut(&mut self, visit: &mut dyn FnMut(&mut dyn BtNode)) {
        for child in self.children.iter_mut() {
            visit(child.node.as_mut());
        }
    }
}
