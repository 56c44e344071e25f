//! Field cursor throughput benchmarks.
//!
//! Run with: `cargo bench --bench field_cursor`
//!
//! Compares direct typed reads, sequential field lists and runtime schemas
//! over the same generated table.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use read_table::{CoordBounds, Field, FieldCursor, ReaderConfig, Schema};

fn generate_lines(count: usize, delimiter: char) -> Vec<String> {
    (0..count)
        .map(|i| {
            let lon = ((i as f64) * 0.37).sin() * 179.0;
            let lat = ((i as f64) * 0.11).cos() * 89.0;
            format!(
                "{id}{d}{lon:.6}{d}{lat:.6}{d}station_{id}{d}{level}",
                id = i + 1,
                d = delimiter,
                lon = lon,
                lat = lat,
                level = (i % 7000) as i32 - 3000
            )
        })
        .collect()
}

fn bench_typed_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_reads");

    for &count in &[1_000usize, 10_000] {
        let lines = generate_lines(count, ' ');
        let bytes: usize = lines.iter().map(String::len).sum();
        group.throughput(Throughput::Bytes(bytes as u64));

        group.bench_with_input(BenchmarkId::new("direct", count), &lines, |b, lines| {
            let mut cursor = FieldCursor::new();
            b.iter(|| {
                let mut sum = 0.0;
                for line in lines {
                    cursor.set_line(line).unwrap();
                    let id = cursor.read_u32().unwrap();
                    let (lon, lat) = cursor.read_coords_in(CoordBounds::default()).unwrap();
                    cursor.skip().unwrap();
                    let level = cursor.read_i16_in(-3000, 4000).unwrap();
                    sum += id as f64 + lon + lat + level as f64;
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("sequential", count), &lines, |b, lines| {
            let mut cursor = FieldCursor::new();
            b.iter(|| {
                let mut sum = 0.0;
                for line in lines {
                    cursor.set_line(line).unwrap();
                    let (mut id, mut pos, mut name, mut level) =
                        (0u32, (0.0, 0.0), String::new(), 0i16);
                    cursor
                        .read_fields([
                            Field::from(&mut id),
                            Field::coords_in(&mut pos, CoordBounds::default()),
                            Field::from(&mut name),
                            Field::i16_in(&mut level, -3000, 4000),
                        ])
                        .unwrap();
                    sum += id as f64 + pos.0 + pos.1 + level as f64 + name.len() as f64;
                }
                black_box(sum)
            });
        });

        let schema = Schema::parse("u32,coords!,str,i16[-3000,4000]").unwrap();
        group.bench_with_input(BenchmarkId::new("schema", count), &lines, |b, lines| {
            let mut cursor = FieldCursor::new();
            b.iter(|| {
                let mut values = 0usize;
                for line in lines {
                    cursor.set_line(line).unwrap();
                    values += schema.read_row(&mut cursor).unwrap().len();
                }
                black_box(values)
            });
        });
    }

    group.finish();
}

fn bench_delimited(c: &mut Criterion) {
    let lines = generate_lines(10_000, '\t');
    let config = ReaderConfig::default().with_delimiter('\t');

    c.bench_function("delimited_strings", |b| {
        let mut cursor = FieldCursor::from_config(&config).unwrap();
        b.iter(|| {
            let mut total = 0usize;
            for line in &lines {
                cursor.set_line(line).unwrap();
                while let Ok(field) = cursor.read_str() {
                    total += field.len();
                }
            }
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_typed_reads, bench_delimited);
criterion_main!(benches);
