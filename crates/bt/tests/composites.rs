use std::cell::RefCell;
use std::rc::Rc;

use bt::{Priority, Selection, Sequence};
use bt_core::{Blackboard, BtNode, BtStatus, NodeKind, NodeMeta, NullClock, TickContext};

type Calls = Rc<RefCell<Vec<&'static str>>>;

/// Leaf that reports a fixed status and records that it ran.
struct Probe {
    meta: NodeMeta,
    label: &'static str,
    status: BtStatus,
    calls: Calls,
}

fn probe(label: &'static str, status: BtStatus, calls: &Calls) -> Box<dyn BtNode> {
    Box::new(Probe {
        meta: NodeMeta::new(NodeKind::Task, label),
        label,
        status,
        calls: calls.clone(),
    })
}

impl BtNode for Probe {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn run(&mut self, _ctx: &mut TickContext<'_>, _blackboard: &mut Blackboard) -> BtStatus {
        self.calls.borrow_mut().push(self.label);
        self.status
    }
}

fn run(node: &mut dyn BtNode, bb: &mut Blackboard) -> BtStatus {
    let mut clock = NullClock;
    let mut ctx = TickContext::new(1, &mut clock);
    node.run(&mut ctx, bb)
}

#[test]
fn sequence_stops_at_first_failure() {
    let calls = Calls::default();
    let mut seq = Sequence::new(vec![
        probe("a", BtStatus::Success, &calls),
        probe("b", BtStatus::Failure, &calls),
        probe("c", BtStatus::Success, &calls),
    ]);
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut seq, &mut bb), BtStatus::Failure);
    assert_eq!(*calls.borrow(), vec!["a", "b"]);
    assert_eq!(bb.log().last(), Some("FAILED: Sequence"));
    assert_eq!(bb.failed_node().map(|n| n.name.as_str()), Some("Sequence"));
}

#[test]
fn sequence_succeeds_after_running_every_child_once() {
    let calls = Calls::default();
    let mut seq = Sequence::new(vec![
        probe("a", BtStatus::Success, &calls),
        probe("b", BtStatus::Success, &calls),
        probe("c", BtStatus::Success, &calls),
    ]);
    let mut bb = Blackboard::new();
    assert_eq!(seq.len(), 3);

    assert_eq!(run(&mut seq, &mut bb), BtStatus::Success);
    assert_eq!(*calls.borrow(), vec!["a", "b", "c"]);
    assert_eq!(
        bb.log().entries(),
        ["RUNNING: Sequence", "SUCCESS: Sequence"]
    );
}

#[test]
fn sequence_reports_running_child_and_skips_the_rest() {
    let calls = Calls::default();
    let mut seq = Sequence::new(vec![
        probe("a", BtStatus::Running, &calls),
        probe("b", BtStatus::Success, &calls),
    ]);
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut seq, &mut bb), BtStatus::Running);
    assert_eq!(*calls.borrow(), vec!["a"]);
}

#[test]
fn selection_runs_every_child_even_after_a_success() {
    let calls = Calls::default();
    let mut sel = Selection::new(vec![
        probe("a", BtStatus::Success, &calls),
        probe("b", BtStatus::Failure, &calls),
        probe("c", BtStatus::Success, &calls),
    ]);
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut sel, &mut bb), BtStatus::Success);
    assert_eq!(*calls.borrow(), vec!["a", "b", "c"]);
    assert_eq!(bb.log().last(), Some("SUCCESS: Selection"));
}

#[test]
fn selection_fails_when_no_child_succeeds() {
    let calls = Calls::default();
    let mut sel = Selection::new(vec![
        probe("a", BtStatus::Failure, &calls),
        probe("b", BtStatus::Failure, &calls),
    ]);
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut sel, &mut bb), BtStatus::Failure);
    assert_eq!(*calls.borrow(), vec!["a", "b"]);
}

#[test]
fn selection_without_success_prefers_running_over_failure() {
    let calls = Calls::default();
    let mut sel = Selection::new(vec![
        probe("a", BtStatus::Running, &calls),
        probe("b", BtStatus::Failure, &calls),
    ]);
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut sel, &mut bb), BtStatus::Running);
    assert_eq!(*calls.borrow(), vec!["a", "b"]);
}

#[test]
fn priority_runs_children_in_ascending_order_stable_on_ties() {
    let calls = Calls::default();
    let mut root = Priority::new(vec![
        (probe("third", BtStatus::Failure, &calls), 3),
        (probe("first", BtStatus::Failure, &calls), 1),
        (probe("second", BtStatus::Success, &calls), 2),
        (probe("first-tie", BtStatus::Running, &calls), 1),
    ]);
    let mut bb = Blackboard::new();

    assert_eq!(root.len(), 4);
    assert_eq!(root.priorities(), vec![1, 1, 2, 3]);
    assert_eq!(run(&mut root, &mut bb), BtStatus::Success);
    assert_eq!(
        *calls.borrow(),
        vec!["first", "first-tie", "second", "third"]
    );
}

#[test]
fn priority_succeeds_even_when_every_child_fails() {
    let calls = Calls::default();
    let mut root = Priority::new(vec![
        (probe("a", BtStatus::Failure, &calls), 0),
        (probe("b", BtStatus::Failure, &calls), 0),
    ]);
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut root, &mut bb), BtStatus::Success);
    assert_eq!(bb.log().last(), Some("SUCCESS: Priority"));
}

#[test]
fn composites_report_their_child_count() {
    let calls = Calls::default();
    assert!(Selection::new(Vec::new()).is_empty());
    assert!(Sequence::new(Vec::new()).is_empty());
    assert!(Priority::new(Vec::new()).is_empty());

    let sel = Selection::new(vec![
        probe("a", BtStatus::Success, &calls),
        probe("b", BtStatus::Failure, &calls),
    ]);
    assert_eq!(sel.len(), 2);
    assert!(!sel.is_empty());
}

#[test]
fn named_composites_log_under_their_own_name() {
    let calls = Calls::default();
    let mut seq = Sequence::named("Go Charge", vec![probe("a", BtStatus::Success, &calls)]);
    let mut bb = Blackboard::new();

    run(&mut seq, &mut bb);
    assert_eq!(
        bb.log().entries(),
        ["RUNNING: Go Charge", "SUCCESS: Go Charge"]
    );
}
