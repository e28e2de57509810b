use bt_core::{Blackboard, BtNode, BtStatus, BuildError, NodeKind, NodeMeta, TickContext};

/// Spends `seconds` of battery and clock time, then runs the child once.
///
/// Reports whatever the child reports. The battery cost is one unit per second and is paid
/// before the child runs.
pub struct Timer {
    meta: NodeMeta,
    child: Box<dyn BtNode>,
    seconds: u32,
}

impl Timer {
    pub fn new(child: Box<dyn BtNode>, seconds: u32) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Decorator, "Timer"),
            child,
            seconds,
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

impl BtNode for Timer {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        tracing::debug!(child = self.child.name(), seconds = self.seconds, "timed run");
        blackboard.drain_battery(self.seconds);
        ctx.sleep_secs(self.seconds);
        let status = self.child.run(ctx, blackboard);
        blackboard.record_outcome(&self.meta, status)
    }

    fn label(&self) -> String {
        format!("{} ({}s)", self.name(), self.seconds)
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(&dyn BtNode)) {
        visit(self.child.as_ref());
    }

    fn for_each_child_mut(&mut self, visit: &mut dyn FnMut(&mut dyn BtNode)) {
        visit(self.child.as_mut());
    }
}

/// Runs the child once and swaps `Success` with `Failure`.
pub struct LogicalNegation {
    meta: NodeMeta,
    child: Box<dyn BtNode>,
}

impl LogicalNegation {
    pub fn new(child: Box<dyn BtNode>) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Decorator, "Logical Negation"),
            child,
        }
    }
}

impl BtNode for LogicalNegation {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        let status = self.child.run(ctx, blackboard).invert();
        blackboard.record_outcome(&self.meta, status)
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(&dyn BtNode)) {
        visit(self.child.as_ref());
    }

    fn for_each_child_mut(&mut self, visit: &mut dyn FnMut(&mut dyn BtNode)) {
        visit(self.child.as_mut());
    }
}

/// Re-runs the child for as long as it succeeds.
///
/// Terminates only when the child fails (reported as `Failure`) or reports `Running` (passed
/// through). A child that always succeeds loops forever unless an iteration cap is set with
/// [`UntilFail::with_max_iterations`]; hitting the cap is reported as `Failure`.
pub struct UntilFail {
    meta: NodeMeta,
    child: Box<dyn BtNode>,
    max_iterations: Option<u32>,
    last_iterations: u32,
}

impl UntilFail {
    pub fn new(child: Box<dyn BtNode>) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Decorator, "Until Fail"),
            child,
            max_iterations: None,
            last_iterations: 0,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn max_iterations(&self) -> Option<u32> {
        self.max_iterations
    }

    /// Number of child runs during the most recent call.
    pub fn last_iterations(&self) -> u32 {
        self.last_iterations
    }
}

impl BtNode for UntilFail {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        let mut iterations: u32 = 0;
        let status = loop {
            if self.max_iterations.is_some_and(|max| iterations >= max) {
                tracing::warn!(
                    node = self.meta.name(),
                    cycle = ctx.cycle,
                    iterations,
                    "child never failed; iteration cap reached"
                );
                blackboard.push_log(format!(
                    "ITERATION CAP: {} after {iterations}",
                    self.meta.name()
                ));
                break BtStatus::Failure;
            }

            iterations = iterations.saturating_add(1);
            match self.child.run(ctx, blackboard) {
                BtStatus::Success => continue,
                BtStatus::Failure => break BtStatus::Failure,
                BtStatus::Running => break BtStatus::Running,
            }
        };
        self.last_iterations = iterations;
        blackboard.record_outcome(&self.meta, status)
    }

    fn label(&self) -> String {
        match self.max_iterations {
            Some(max) => format!("{} (cap {max})", self.name()),
            None => self.name().to_string(),
        }
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(&dyn BtNode)) {
        visit(self.child.as_ref());
    }

    fn for_each_child_mut(&mut self, visit: &mut dyn FnMut(&mut dyn BtNode)) {
        visit(self.child.as_mut());
    }

    fn validate(&self) -> Result<(), BuildError> {
        if self.max_iterations == Some(0) {
            return Err(BuildError::ZeroIterationCap {
                name: self.meta.name().to_string(),
                id: self.meta.id(),
            });
        }
        Ok(())
    }
}
