//! Benchmarks for identrs.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use identrs::{DigestAlgorithm, EntropyCounter, IdentifyConfig, filetype};

fn bench_identifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("identifier");

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        // Deterministic pseudo-random data
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));

        for (name, config) in [
            ("default", IdentifyConfig::default()),
            ("checksum_only", IdentifyConfig::checksum_only()),
            ("with_gzip", IdentifyConfig::default().with_gzip_cache_size(1 << 20)),
        ] {
            group.bench_with_input(format!("{name}_{}kb", size / 1024), &data, |b, data| {
                let mut identifier = config.identifier();
                b.iter(|| {
                    identifier.reset();
                    for chunk in data.chunks(64 * 1024) {
                        identifier.write(black_box(chunk)).unwrap();
                    }
                    identifier.close().unwrap();
                    black_box(identifier.size())
                });
            });
        }
    }

    group.finish();
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");
    let size = 1024 * 1024; // 1 MB
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    for &algorithm in DigestAlgorithm::ALL {
        let config = IdentifyConfig::new(false, false, false, false, false, false, 0, 0)
            .with_algorithm(algorithm, true);
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| {
                let mut identifier = config.identifier();
                identifier.write(black_box(&data)).unwrap();
                black_box(identifier.digest(algorithm))
            });
        });
    }

    group.bench_function("entropy", |b| {
        b.iter(|| {
            let mut counter = EntropyCounter::new();
            counter.update(black_box(&data));
            black_box(counter.entropy())
        });
    });

    group.finish();
}

fn bench_filetype(c: &mut Criterion) {
    let text = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let mut binary = vec![0x7F, b'E', b'L', b'F'];
    binary.resize(4096, 0);

    c.bench_function("filetype_text", |b| {
        b.iter(|| black_box(filetype::detect(black_box(&text), filetype::DEFAULT_SNIFF_LIMIT)))
    });
    c.bench_function("filetype_elf", |b| {
        b.iter(|| black_box(filetype::detect(black_box(&binary), filetype::DEFAULT_SNIFF_LIMIT)))
    });
}

criterion_group!(benches, bench_identifier, bench_algorithms, bench_filetype);
criterion_main!(benches);
