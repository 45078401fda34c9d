//! Benchmarks for mesh construction and full figure composition.
//!
//! Run with: cargo bench --package renderer --bench mesh_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use radar_common::{default_rings, national_preset, BoundingBox, RadarVariable};
use renderer::{build_mesh, encode_png, ColorScale, GeographyPaths, MaskedField, RadarRenderer, RenderAssets, RenderRequest};
use test_utils::{synthetic_volume, temp_test_dir, write_logo};

fn bench_build_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_mesh");
    let visible = BoundingBox::new(-200_000.0, -200_000.0, 200_000.0, 200_000.0);

    for &(rays, bins) in &[(360usize, 250usize), (720, 500)] {
        let volume = synthetic_volume("bench", &[RadarVariable::Dbzh], rays, bins, 300.0);
        let field = volume.field(RadarVariable::Dbzh).unwrap();
        let masked = MaskedField::for_variable(field, RadarVariable::Dbzh);
        let scale = ColorScale::for_variable(RadarVariable::Dbzh);

        group.throughput(Throughput::Elements((rays * bins) as u64));
        group.bench_with_input(
            BenchmarkId::new("samples", format!("{}x{}", rays, bins)),
            &(rays, bins),
            |b, _| {
                b.iter(|| {
                    build_mesh(
                        black_box(&volume.range_m),
                        black_box(&volume.azimuth_deg),
                        &masked,
                        &scale,
                        &visible,
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let dir = temp_test_dir();
    let logo = write_logo(dir.path());
    let assets = RenderAssets::load(&logo, None, &GeographyPaths::default(), default_rings(), 1000).unwrap();
    let renderer = RadarRenderer::new(assets);
    let volume = synthetic_volume("bench", &[RadarVariable::Velh], 360, 250, 300.0);
    let preset = national_preset();

    c.bench_function("compose_national_1000px", |b| {
        b.iter(|| {
            let request = RenderRequest {
                volume: &volume,
                variable: RadarVariable::Velh,
                framing: &preset.framing,
                markers: &preset.markers,
                title: "bench",
                output_dir: dir.path(),
            };
            let img = renderer.compose(black_box(&request)).unwrap();
            encode_png(&img).unwrap()
        })
    });
}

criterion_group!(benches, bench_build_mesh, bench_compose);
criterion_main!(benches);
