use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rustrbc::navier::Navier2D;
use rustrbc::RelaxationKind;
use rustrbc::RbcConfig;

const SIZES: [(usize, usize); 3] = [(65, 33), (129, 65), (257, 129)];

pub fn bench_navier(c: &mut Criterion) {
    let mut group = c.benchmark_group("Navier2D");
    group.significance_level(0.1).sample_size(10);
    for relaxation in [RelaxationKind::GaussSeidel, RelaxationKind::Jacobi].iter() {
        for (nx, ny) in SIZES.iter() {
            let config = RbcConfig {
                nx: *nx,
                ny: *ny,
                ra: 1e4,
                relaxation: *relaxation,
                ..RbcConfig::default()
            };
            let navier = Navier2D::from_config(&config).unwrap();
            let name = format!("{:?} Size: {} x {}", relaxation, nx, ny);
            group.bench_function(&name, |b| {
                b.iter_batched(
                    || navier.clone(),
                    |mut navier| navier.advance_one_step(),
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_navier);
criterion_main!(benches);
