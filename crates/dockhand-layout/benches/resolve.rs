//! Benchmark: constraint resolution and tab cycling for wide panels.
//!
//! Measures size and min/max resolution over 10, 100 and 1000 frames, plus
//! one full keyboard cycle through every tab.

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dockhand_core::{Constraint, EventLog, LayoutChangeCounter, SizeValue, TimerQueue};
use dockhand_layout::{resolve_min_max, resolve_size, ContentFrame, Declared, DockPanel, PanelContext};

// ── Helpers ──

/// Frames with varied sizes; every 7th one is auto-sized and every 5th lacks a max.
fn generate_frames(n: usize) -> Vec<ContentFrame> {
    (0..n)
        .map(|i| {
            let width = if i % 7 == 0 {
                SizeValue::Auto
            } else {
                SizeValue::Px(100.0 + (i % 300) as f32)
            };
            let mut frame = ContentFrame::new(i as u64, format!("frame{}", i))
                .with_size(width, SizeValue::Px(50.0 + (i % 400) as f32))
                .with_attribute(Constraint::MinWidth, format!("{}", 80 + i % 250))
                .with_attribute(Constraint::MinHeight, format!("{}px", 60 + i % 180));
            if i % 5 != 0 {
                frame = frame.with_attribute(Constraint::MaxWidth, format!("{}", 400 + i % 600));
            }
            frame
        })
        .collect()
}

fn context() -> PanelContext {
    PanelContext::new(
        Rc::new(EventLog::new()),
        Rc::new(LayoutChangeCounter::new()),
        Rc::new(TimerQueue::new()),
    )
}

// ── Benchmarks ──

fn bench_resolve(c: &mut Criterion) {
    let declared = Declared::default();

    let mut group = c.benchmark_group("resolve_constraints");
    for &n in &[10, 100, 1000] {
        let frames = generate_frames(n);

        group.bench_with_input(BenchmarkId::new("size", n), &n, |b, _| {
            b.iter(|| black_box(resolve_size(&declared, frames.iter())));
        });

        group.bench_with_input(BenchmarkId::new("min_max", n), &n, |b, _| {
            b.iter(|| black_box(resolve_min_max(&declared, frames.iter())));
        });
    }
    group.finish();
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("tab_cycle");
    for &n in &[10, 100] {
        let mut panel = DockPanel::with_frames(1, context(), generate_frames(n));

        group.bench_with_input(BenchmarkId::new("full_cycle", n), &n, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(panel.select_next());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_cycle);
criterion_main!(benches);
