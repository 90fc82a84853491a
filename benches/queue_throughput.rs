// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the notification queue.
//!
//! Measures the performance of:
//! - Building and queueing messages, then dismissing them
//! - Event delivery with many observers attached
//! - Draining due auto-dismissals from a polled scheduler

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::rc::Rc;
use std::time::{Duration, Instant};
use toast_queue::notifications::{DefaultFactory, Manager, TickScheduler};

fn bench_queue_dismiss(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_throughput");

    for count in [10_usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("queue_then_dismiss", count), &count, |b, &count| {
            b.iter(|| {
                let manager = Manager::new();
                let messages: Vec<_> = (0..count)
                    .map(|i| manager.create_message().body(format!("message {i}")).queue())
                    .collect();
                for message in &messages {
                    manager.dismiss(message);
                }
                black_box(manager.len());
            });
        });
    }

    group.finish();
}

fn bench_observer_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("observer_fanout");

    for observers in [1_usize, 16, 128] {
        let manager = Manager::new();
        for _ in 0..observers {
            manager.subscribe(|event| {
                black_box(event);
            });
        }
        group.bench_with_input(BenchmarkId::from_parameter(observers), &manager, |b, manager| {
            b.iter(|| {
                let message = manager.create_message().header("fan-out").queue();
                manager.dismiss(&message);
            });
        });
    }

    group.finish();
}

fn bench_auto_dismiss_drain(c: &mut Criterion) {
    c.bench_function("auto_dismiss_drain_500", |b| {
        b.iter(|| {
            let scheduler = Rc::new(TickScheduler::manual(Instant::now()));
            let manager = Manager::with_parts(Rc::new(DefaultFactory::new()), scheduler.clone());
            manager.set_auto_dismiss(Some(Duration::from_secs(5)));
            for i in 0..500 {
                manager.create_message().body(format!("toast {i}")).queue();
            }
            black_box(scheduler.advance(Duration::from_secs(5)));
        });
    });
}

criterion_group!(
    benches,
    bench_queue_dismiss,
    bench_observer_fanout,
    bench_auto_dismiss_drain
);
criterion_main!(benches);
