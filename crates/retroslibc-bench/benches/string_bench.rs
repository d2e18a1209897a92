//! String function benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use retroslibc_core::string::{memcmp, memcpy, memmove, memset, strcmp, strlen};

const SIZES: &[usize] = &[16, 64, 256, 1024, 4096, 65536];

fn bench_memcpy_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("memcpy");

    for &size in SIZES {
        let src = vec![0xABu8; size];
        let mut dst = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("retroslibc", size), &size, |b, &sz| {
            b.iter(|| {
                memcpy(&mut dst, black_box(&src), sz);
                black_box(&dst);
            });
        });

        group.bench_with_input(BenchmarkId::new("host_libc", size), &size, |b, &sz| {
            b.iter(|| {
                // SAFETY: both buffers are `sz` bytes long and do not overlap.
                unsafe {
                    libc::memcpy(
                        dst.as_mut_ptr().cast(),
                        black_box(src.as_ptr()).cast(),
                        sz,
                    );
                }
                black_box(&dst);
            });
        });
    }
    group.finish();
}

fn bench_memset(c: &mut Criterion) {
    let mut group = c.benchmark_group("memset");

    for &size in SIZES {
        let mut buf = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("retroslibc", size), &size, |b, &sz| {
            b.iter(|| {
                memset(&mut buf, black_box(0x5A), sz);
                black_box(&buf);
            });
        });
    }
    group.finish();
}

fn bench_memmove_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("memmove_overlap");

    for &size in SIZES {
        let mut buf: Vec<u8> = (0..size + 8).map(|i| i as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("backward", size), &size, |b, &sz| {
            b.iter(|| {
                memmove(&mut buf, 8, 0, sz);
                black_box(&buf);
            });
        });
        group.bench_with_input(BenchmarkId::new("forward", size), &size, |b, &sz| {
            b.iter(|| {
                memmove(&mut buf, 0, 8, sz);
                black_box(&buf);
            });
        });
    }
    group.finish();
}

fn bench_memcmp_equal(c: &mut Criterion) {
    let mut group = c.benchmark_group("memcmp_equal");

    for &size in SIZES {
        let a = vec![0x11u8; size];
        let b_buf = a.clone();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("retroslibc", size), &size, |b, &sz| {
            b.iter(|| black_box(memcmp(black_box(&a), black_box(&b_buf), sz)));
        });
    }
    group.finish();
}

fn bench_strlen(c: &mut Criterion) {
    let mut group = c.benchmark_group("strlen");

    for &size in &SIZES[..5] {
        let mut s = vec![b'A'; size];
        s.push(0);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("retroslibc", size), &size, |b, _| {
            b.iter(|| black_box(strlen(black_box(&s))));
        });

        group.bench_with_input(BenchmarkId::new("host_libc", size), &size, |b, _| {
            b.iter(|| {
                // SAFETY: `s` is NUL-terminated.
                let len = unsafe { libc::strlen(black_box(s.as_ptr()).cast()) };
                black_box(len);
            });
        });
    }
    group.finish();
}

fn bench_strcmp_equal(c: &mut Criterion) {
    let mut group = c.benchmark_group("strcmp_equal");

    for &size in &SIZES[..5] {
        let mut a = vec![b'x'; size];
        a.push(0);
        let b_buf = a.clone();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("retroslibc", size), &size, |b, _| {
            b.iter(|| black_box(strcmp(black_box(&a), black_box(&b_buf))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_memcpy_sizes,
    bench_memset,
    bench_memmove_overlap,
    bench_memcmp_equal,
    bench_strlen,
    bench_strcmp_equal
);
criterion_main!(benches);
