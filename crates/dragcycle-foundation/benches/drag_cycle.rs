use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dragcycle_foundation::{
    DragCycleDetector, DragEvent, DragGestureNode, ImpulseVelocityTracker, IndirectTouchEvent,
    PointerEventPass, VelocityTracker,
};
use dragcycle_geometry::{Point, Velocity};
use dragcycle_testing::GestureScript;

const MOVE_COUNT_SAMPLES: &[usize] = &[16, 128, 1024];

#[derive(Default)]
struct CountingNode {
    events: usize,
}

impl DragGestureNode for CountingNode {
    fn on_drag_event(&mut self, _event: DragEvent) {
        self.events += 1;
    }
}

fn gesture_frames(moves: usize) -> Vec<IndirectTouchEvent> {
    let mut script = GestureScript::new().with_frame_interval(8);
    let mut frames = vec![script.down(0, Point::ZERO)];
    for step in 0..moves {
        let wobble = if step % 2 == 0 { 0.5 } else { -0.5 };
        frames.push(script.move_by(0, Point::new(wobble, 3.0)));
    }
    frames.push(script.up(0));
    frames
}

fn bench_drag_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_cycle");
    for &moves in MOVE_COUNT_SAMPLES {
        let frames = gesture_frames(moves);
        group.bench_with_input(BenchmarkId::new("moves", moves), &frames, |b, frames| {
            b.iter(|| {
                let mut detector = DragCycleDetector::new();
                let mut node = CountingNode::default();
                for frame in frames {
                    let mut frame = frame.clone();
                    for pass in PointerEventPass::ALL {
                        detector.process(&mut node, &mut frame, pass);
                    }
                }
                black_box(node.events)
            });
        });
    }
    group.finish();
}

fn bench_velocity_estimate(c: &mut Criterion) {
    let mut tracker = ImpulseVelocityTracker::new();
    for i in 0..20u64 {
        tracker.add_sample(i * 8, Point::new(i as f32 * 2.0, i as f32 * 5.0));
    }
    let maximum = Velocity::new(8000.0, 8000.0);

    c.bench_function("velocity_estimate", |b| {
        b.iter(|| black_box(tracker.estimate_velocity(black_box(maximum))));
    });
}

criterion_group!(benches, bench_drag_cycle, bench_velocity_estimate);
criterion_main!(benches);
