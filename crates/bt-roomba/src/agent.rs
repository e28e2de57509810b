//! The vacuum robot: its flags, leaves, and the tree that ties them together.

use bt::{
    Charge, ChargeSource, Condition, LogicalNegation, Priority, Selection, Sequence, Task, Timer,
    UntilFail,
};
use bt_core::{Blackboard, BtNode, Flag, HomePath};

/// Spot clean requested.
pub const SPOT: Flag = Flag("spot");
/// General clean requested.
pub const GENERAL: Flag = Flag("general");
/// A dusty spot was detected during general cleaning.
pub const DUSTY_SPOT: Flag = Flag("dusty_spot");

/// Below this level the robot heads home to charge.
pub const LOW_BATTERY: u8 = 30;
pub const SPOT_CLEAN_SECONDS: u32 = 20;
pub const DUSTY_SPOT_CLEAN_SECONDS: u32 = 35;

pub fn battery_check() -> Box<dyn BtNode> {
    Box::new(Condition::new("Battery Check", |bb: &Blackboard| {
        bb.battery_level() < LOW_BATTERY
    }))
}

pub fn spot_requested() -> Box<dyn BtNode> {
    Box::new(Condition::new("Spot", |bb: &Blackboard| bb.flag(SPOT)))
}

pub fn general_requested() -> Box<dyn BtNode> {
    Box::new(Condition::new("General", |bb: &Blackboard| bb.flag(GENERAL)))
}

pub fn dusty_spot_detected() -> Box<dyn BtNode> {
    Box::new(Condition::new("Dusty Spot", |bb: &Blackboard| {
        bb.flag(DUSTY_SPOT)
    }))
}

pub fn find_home() -> Box<dyn BtNode> {
    Box::new(Task::new("Find Home", |bb: &mut Blackboard| {
        bb.set_home_path(HomePath::Planned)
    }))
}

pub fn go_home() -> Box<dyn BtNode> {
    Box::new(Task::new("Go Home", |bb: &mut Blackboard| {
        bb.set_home_path(HomePath::Home)
    }))
}

pub fn dock(source: impl ChargeSource) -> Box<dyn BtNode> {
    Box::new(Charge::new("Dock", source))
}

pub fn spot_cleaning() -> Box<dyn BtNode> {
    Box::new(Task::new("Spot Cleaning", |bb: &mut Blackboard| {
        bb.set_flag(SPOT, false)
    }))
}

pub fn done_spot() -> Box<dyn BtNode> {
    Box::new(Task::new("Done Spot", |bb: &mut Blackboard| {
        bb.set_flag(SPOT, false)
    }))
}

pub fn general_cleaning() -> Box<dyn BtNode> {
    Box::new(Task::plain("General Cleaning"))
}

pub fn done_general() -> Box<dyn BtNode> {
    Box::new(Task::new("Done General", |bb: &mut Blackboard| {
        bb.set_flag(GENERAL, false)
    }))
}

pub fn do_nothing() -> Box<dyn BtNode> {
    Box::new(Task::plain("Do Nothing"))
}

/// Low battery: find the way home, drive there, and charge.
pub fn battery_subtree(dock_source: impl ChargeSource) -> Box<dyn BtNode> {
    Box::new(Sequence::new(vec![
        battery_check(),
        find_home(),
        go_home(),
        dock(dock_source),
    ]))
}

/// Spot clean for a fixed time, then mark the request done.
pub fn spot_subtree() -> Box<dyn BtNode> {
    Box::new(Sequence::new(vec![
        spot_requested(),
        Box::new(Timer::new(spot_cleaning(), SPOT_CLEAN_SECONDS)),
        done_spot(),
    ]))
}

/// General clean: keep cleaning (with a longer pass over dusty spots) while the battery holds.
///
/// The loop ends when the battery check flips to low, which makes the loop fail; `Done General`
/// therefore only runs if the loop itself succeeds.
pub fn general_subtree(until_fail_cap: Option<u32>) -> Box<dyn BtNode> {
    let dusty = Sequence::new(vec![
        dusty_spot_detected(),
        Box::new(Timer::new(spot_cleaning(), DUSTY_SPOT_CLEAN_SECONDS)),
    ]);
    let clean_pass = Selection::new(vec![Box::new(dusty), general_cleaning()]);
    let while_charged = Sequence::new(vec![
        Box::new(LogicalNegation::new(battery_check())),
        Box::new(clean_pass),
    ]);

    let mut until_fail = UntilFail::new(Box::new(while_charged));
    if let Some(cap) = until_fail_cap {
        until_fail = until_fail.with_max_iterations(cap);
    }

    Box::new(Sequence::new(vec![
        general_requested(),
        Box::new(Sequence::new(vec![Box::new(until_fail), done_general()])),
    ]))
}

pub fn cleaning_subtree(until_fail_cap: Option<u32>) -> Box<dyn BtNode> {
    Box::new(Selection::new(vec![
        spot_subtree(),
        general_subtree(until_fail_cap),
    ]))
}

/// The full robot tree: charge first, then clean, then idle.
pub fn build_tree(dock_source: impl ChargeSource, until_fail_cap: Option<u32>) -> Box<dyn BtNode> {
    Box::new(Priority::new(vec![
        (battery_subtree(dock_source), 1),
        (cleaning_subtree(until_fail_cap), 2),
        (do_nothing(), 3),
    ]))
}

/// Requested charge per `Dock` run, in order. Once exhausted the last amount repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeSchedule {
    amounts: Vec<u32>,
    next: usize,
}

impl ChargeSchedule {
    pub fn new(amounts: Vec<u32>) -> Self {
        Self { amounts, next: 0 }
    }
}

impl ChargeSource for ChargeSchedule {
    fn requested_charge(&mut self, _blackboard: &Blackboard) -> u32 {
        let amount = self
            .amounts
            .get(self.next)
            .or_else(|| self.amounts.last())
            .copied()
            .unwrap_or(0);
        if self.next < self.amounts.len() {
            self.next += 1;
        }
        amount
    }
}
