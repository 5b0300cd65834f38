use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use marble_physics::collision::{StaticWorld, SurfaceMaterial};
use marble_physics::marble::Marble;
use marble_physics::models::{Move, ObjectId, Point3D};
use marble_physics::platforms::LinearPathedInterior;
use marble_physics::utils::MarbleConstants;

fn tiled_floor(tiles: i32) -> StaticWorld {
    let mut world = StaticWorld::new();
    for i in -tiles..tiles {
        for j in -tiles..tiles {
            let min = Point3D::new(f64::from(i), f64::from(j), -1.0);
            world
                .add_box(min, min + Point3D::new(1.0, 1.0, 1.0), ObjectId(0), SurfaceMaterial::default())
                .unwrap();
        }
    }
    world
}

pub fn bench_advance_physics(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_physics");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(100);

    // 384 surfaces stay on the serial broad phase; 6144 go through rayon.
    for tiles in [4, 16] {
        let mut world = tiled_floor(tiles);
        let mut platforms: Vec<LinearPathedInterior> = Vec::new();
        let roll = Move::with_stick(0.3, 1.0);

        group.bench_function(format!("roll_32ms_{}_surfaces", world.surfaces().len()), |b| {
            b.iter(|| {
                let mut marble = Marble::new(MarbleConstants::default(), Point3D::new(0.5, 0.5, 0.2)).unwrap();
                for _ in 0..8 {
                    black_box(marble.advance_physics(&roll, 32, &mut world, &mut platforms, &mut ()));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance_physics);
criterion_main!(benches);
