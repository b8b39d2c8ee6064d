//! # Forward kinematics benchmarks
//!
//! The readout solves the kinematics at least once per status, twice when
//! the commanded pose is shown too, so the solve has to stay cheap against
//! the 10 Hz cycle.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use panel_if::offset::WorkOffset;
use scara_lib::readout::{fk, translate, LinkGeometry};

fn bench_fk(c: &mut Criterion) {
    let geom = LinkGeometry::new(100.0, 80.0).unwrap();
    let work = WorkOffset {
        x: 10.0,
        y: 5.0,
        z: 2.0,
        a: 0.3,
    };

    c.bench_function("fk", |b| {
        b.iter(|| fk(&geom, black_box(27.5), black_box(63.0)).unwrap())
    });

    c.bench_function("fk and work frame", |b| {
        b.iter(|| translate(fk(&geom, black_box(27.5), black_box(63.0)).unwrap(), &work))
    });
}

criterion_group!(benches, bench_fk);
criterion_main!(benches);
