use bt::{BehaviorTree, Condition, Priority, Sequence, Task};
use bt_core::{Blackboard, BtNode};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn always_true(_bb: &Blackboard) -> bool {
    true
}

fn bench_run_cycle(c: &mut Criterion) {
    let conditions = (0..32)
        .map(|_| Box::new(Condition::new("Always", always_true)) as Box<dyn BtNode>)
        .collect::<Vec<_>>();
    let root = Priority::new(vec![
        (Box::new(Sequence::new(conditions)) as Box<dyn BtNode>, 1),
        (Box::new(Task::plain("Idle").with_cost(0)) as Box<dyn BtNode>, 2),
    ]);

    let mut tree = match BehaviorTree::build(Box::new(root), Blackboard::new()) {
        Ok(tree) => tree,
        Err(err) => panic!("benchmark tree is invalid: {err}"),
    };

    c.bench_function("bt/run_cycle(conditions=32)", |b| {
        b.iter(|| {
            black_box(tree.run_cycle());
            black_box(tree.take_log());
        })
    });
}

criterion_group!(benches, bench_run_cycle);
criterion_main!(benches);
