use core_estimate::{
    recompute, Catalog, Coordinate, MissionInputs, PersonnelEntry, PersonnelId, Site, SiteId,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn mission_with_sites(count: u32) -> MissionInputs {
    let mut inputs = MissionInputs::new("Lusaka");
    inputs.sites = (0..count)
        .map(|i| {
            let step = f64::from(i) * 0.05;
            Site {
                id: SiteId(i),
                name: format!("block {i}"),
                coordinate: Coordinate::new(-15.0 + step, 27.0 + step),
                boundary: Vec::new(),
            }
        })
        .collect();
    inputs
        .personnel
        .push(PersonnelEntry::new(PersonnelId(0), "Mine Surveyor", 3, 5));
    inputs
        .personnel
        .push(PersonnelEntry::new(PersonnelId(1), "Driver", 1, 5));
    inputs.fuel_price = 27.5;
    inputs.fleet_count = 2;
    inputs
}

fn bench_recompute(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let mut group = c.benchmark_group("recompute");

    for size in [1u32, 10, 50, 200] {
        let inputs = mission_with_sites(size);
        group.bench_with_input(BenchmarkId::new("sites", size), &inputs, |b, inputs| {
            b.iter(|| recompute(inputs, &catalog))
        });
    }

    group.finish();
}

criterion_group!(recompute_benches, bench_recompute);
criterion_main!(recompute_benches);
