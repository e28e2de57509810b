use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use bt::{Condition, LogicalNegation, Timer, UntilFail};
use bt_core::{
    Blackboard, BlackboardConfig, BtNode, BtStatus, Clock, ManualClock, NodeKind, NodeMeta,
    NullClock, TickContext,
};

fn run_with(node: &mut dyn BtNode, bb: &mut Blackboard, clock: &mut dyn Clock) -> BtStatus {
    let mut ctx = TickContext::new(1, clock);
    node.run(&mut ctx, bb)
}

fn run(node: &mut dyn BtNode, bb: &mut Blackboard) -> BtStatus {
    run_with(node, bb, &mut NullClock)
}

fn constant(status: bool) -> Box<dyn BtNode> {
    Box::new(Condition::new("Constant", move |_bb: &Blackboard| status))
}

/// Leaf that reports `Running` every time.
struct Busy {
    meta: NodeMeta,
}

impl BtNode for Busy {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, _ctx: &mut TickContext<'_>, _blackboard: &mut Blackboard) -> BtStatus {
        BtStatus::Running
    }
}

fn busy() -> Box<dyn BtNode> {
    Box::new(Busy {
        meta: NodeMeta::new(NodeKind::Task, "Busy"),
    })
}

#[test]
fn negation_inverts_terminal_statuses() {
    let mut bb = Blackboard::new();

    let mut not_true = LogicalNegation::new(constant(true));
    assert_eq!(run(&mut not_true, &mut bb), BtStatus::Failure);
    assert_eq!(bb.log().last(), Some("FAILED: Logical Negation"));

    let mut not_false = LogicalNegation::new(constant(false));
    assert_eq!(run(&mut not_false, &mut bb), BtStatus::Success);

    let mut not_busy = LogicalNegation::new(busy());
    assert_eq!(run(&mut not_busy, &mut bb), BtStatus::Running);
}

#[test]
fn double_negation_matches_the_raw_child() {
    let mut bb = Blackboard::new();
    for value in [true, false] {
        let mut raw = constant(value);
        let expected = run(raw.as_mut(), &mut bb);

        let mut twice = LogicalNegation::new(Box::new(LogicalNegation::new(constant(value))));
        assert_eq!(run(&mut twice, &mut bb), expected);
    }
}

#[test]
fn timer_drains_battery_before_running_child_once() {
    let seen = Rc::new(Cell::new(None));
    let runs = Rc::new(Cell::new(0u32));
    let child = {
        let seen = seen.clone();
        let runs = runs.clone();
        Condition::new("Observe", move |bb: &Blackboard| {
            seen.set(Some(bb.battery_level()));
            runs.set(runs.get() + 1);
            false
        })
    };
    let mut timer = Timer::new(Box::new(child), 20);
    let mut bb = Blackboard::from_config(&BlackboardConfig::default().with_battery(90));
    let mut clock = ManualClock::new();

    assert_eq!(run_with(&mut timer, &mut bb, &mut clock), BtStatus::Failure);
    assert_eq!(seen.get(), Some(70));
    assert_eq!(runs.get(), 1);
    assert_eq!(clock.requests, vec![Duration::from_secs(20)]);
    assert_eq!(timer.label(), "Timer (20s)");
}

#[test]
fn timer_clamps_drain_at_zero() {
    let mut timer = Timer::new(constant(true), 35);
    let mut bb = Blackboard::from_config(&BlackboardConfig::default().with_battery(10));

    assert_eq!(run(&mut timer, &mut bb), BtStatus::Success);
    assert_eq!(bb.battery_level(), 0);
}

#[test]
fn until_fail_repeats_until_the_child_fails() {
    let remaining = Rc::new(Cell::new(3u32));
    let child = {
        let remaining = remaining.clone();
        Condition::new("Countdown", move |_bb: &Blackboard| {
            let left = remaining.get();
            remaining.set(left.saturating_sub(1));
            left > 0
        })
    };
    let mut node = UntilFail::new(Box::new(child));
    let mut bb = Blackboard::new();
    assert_eq!(node.max_iterations(), None);

    assert_eq!(run(&mut node, &mut bb), BtStatus::Failure);
    assert_eq!(node.last_iterations(), 4);
    assert_eq!(bb.log().last(), Some("FAILED: Until Fail"));
}

#[test]
fn until_fail_is_bounded_by_its_iteration_cap() {
    let runs = Rc::new(Cell::new(0u32));
    let child = {
        let runs = runs.clone();
        Condition::new("Always", move |_bb: &Blackboard| {
            runs.set(runs.get() + 1);
            true
        })
    };
    let mut node = UntilFail::new(Box::new(child)).with_max_iterations(5);
    let mut bb = Blackboard::new();
    assert_eq!(node.max_iterations(), Some(5));

    assert_eq!(run(&mut node, &mut bb), BtStatus::Failure);
    assert_eq!(runs.get(), 5);
    assert_eq!(node.last_iterations(), 5);
    assert!(bb
        .log()
        .iter()
        .any(|line| line == "ITERATION CAP: Until Fail after 5"));
}

#[test]
fn until_fail_passes_running_through() {
    let mut node = UntilFail::new(busy()).with_max_iterations(10);
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut node, &mut bb), BtStatus::Running);
    assert_eq!(node.last_iterations(), 1);
}
