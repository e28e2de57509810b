use std::borrow::Cow;
use std::time::Duration;

use bt_core::{Blackboard, BtNode, BtStatus, NodeKind, NodeMeta, TickContext, DEFAULT_DRAIN};

/// Predicate over the blackboard. Reads only; logs the outcome.
pub struct Condition<F> {
    meta: NodeMeta,
    cond: F,
}

impl<F> Condition<F>
where
    F: FnMut(&Blackboard) -> bool + 'static,
{
    pub fn new(name: impl Into<Cow<'static, str>>, cond: F) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Condition, name),
            cond,
        }
    }
}

impl<F> BtNode for Condition<F>
where
    F: FnMut(&Blackboard) -> bool + 'static,
{
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, _ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        let status = BtStatus::from((self.cond)(&*blackboard));
        blackboard.record_outcome(&self.meta, status)
    }
}

fn no_effect(_blackboard: &mut Blackboard) {}

/// One unit of work: optional blackboard effect, a battery cost, and a simulated duration.
///
/// Tasks always succeed.
pub struct Task<F> {
    meta: NodeMeta,
    effect: F,
    cost: u32,
    duration: Duration,
}

impl Task<fn(&mut Blackboard)> {
    /// A task with no blackboard effect beyond its battery cost.
    pub fn plain(name: impl Into<Cow<'static, str>>) -> Self {
        Task::new(name, no_effect as fn(&mut Blackboard))
    }
}

impl<F> Task<F>
where
    F: FnMut(&mut Blackboard) + 'static,
{
    pub fn new(name: impl Into<Cow<'static, str>>, effect: F) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Task, name),
            effect,
            cost: DEFAULT_DRAIN,
            duration: Duration::from_secs(1),
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl<F> BtNode for Task<F>
where
    F: FnMut(&mut Blackboard) + 'static,
{
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        blackboard.drain_battery(self.cost);
        (self.effect)(blackboard);
        ctx.sleep(self.duration);
        blackboard.record_outcome(&self.meta, BtStatus::Success)
    }
}

/// Decides how much charge a [`Charge`] node asks for each time it runs.
pub trait ChargeSource: 'static {
    fn requested_charge(&mut self, blackboard: &Blackboard) -> u32;
}

impl<F> ChargeSource for F
where
    F: FnMut(&Blackboard) -> u32 + 'static,
{
    fn requested_charge(&mut self, blackboard: &Blackboard) -> u32 {
        self(blackboard)
    }
}

/// Always requests the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCharge(pub u32);

impl ChargeSource for FixedCharge {
    fn requested_charge(&mut self, _blackboard: &Blackboard) -> u32 {
        self.0
    }
}

/// Charging task: one battery unit per second, clamped at full.
///
/// Only the applied amount is waited for, so a nearly full battery charges quickly.
pub struct Charge<S> {
    meta: NodeMeta,
    source: S,
    last_applied: Option<u8>,
}

impl<S> Charge<S>
where
    S: ChargeSource,
{
    pub fn new(name: impl Into<Cow<'static, str>>, source: S) -> Self {
        Self {
            meta: NodeMeta::new(NodeKind::Task, name),
            source,
            last_applied: None,
        }
    }

    /// Charge applied by the most recent run.
    pub fn last_applied(&self) -> Option<u8> {
        self.last_applied
    }
}

impl<S> BtNode for Charge<S>
where
    S: ChargeSource,
{
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus {
        blackboard.record_running(&self.meta);
        let requested = self.source.requested_charge(&*blackboard);
        let applied = blackboard.charge_battery(requested);
        if u32::from(applied) < requested {
            tracing::debug!(requested, applied, "charge clamped at full battery");
        }
        self.last_applied = Some(applied);
        ctx.sleep_secs(u32::from(applied));
        blackboard.record_outcome(&self.meta, BtStatus::Success)
    }
}
