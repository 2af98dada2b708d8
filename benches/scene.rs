//! Criterion benchmarks for one dashboard render cycle.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quaytwin::dashboard::Dashboard;
use quaytwin::scenario::{Benchmark, Scenario};
use quaytwin::scene::render_frame;
use quaytwin::session::SessionState;
use quaytwin::svg::{scene_to_svg, DEFAULT_HEIGHT_PX, DEFAULT_WIDTH_PX};

/// render_frame() per scenario (smoke/bubble counts differ).
fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");

    for &scenario in Scenario::all() {
        group.bench_with_input(
            BenchmarkId::from_parameter(scenario.key()),
            &scenario,
            |b, &scenario| {
                let params = scenario.params();
                let mut frame = 0u64;
                b.iter(|| {
                    frame += 1;
                    black_box(render_frame(params, frame).shapes.len())
                });
            },
        );
    }

    group.finish();
}

/// Full cycle: view composition + tick.
fn bench_cycle(c: &mut Criterion) {
    let dashboard = Dashboard::new(None);
    c.bench_function("dashboard_cycle", |b| {
        let mut state = SessionState::new();
        state.select_scenario(Benchmark::Productivo);
        b.iter(|| {
            let (view, next) = dashboard.cycle(state);
            state = next;
            black_box(view.frame)
        });
    });
}

/// SVG export of a fully loaded frame.
fn bench_svg(c: &mut Criterion) {
    let scene = render_frame(Scenario::Productivo.params(), 120);
    c.bench_function("scene_to_svg", |b| {
        b.iter(|| black_box(scene_to_svg(&scene, DEFAULT_WIDTH_PX, DEFAULT_HEIGHT_PX).len()))
    });
}

criterion_group!(benches, bench_render_frame, bench_cycle, bench_svg);
criterion_main!(benches);
