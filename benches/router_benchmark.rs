//! Routing benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hyper::Method;
use s3emu_router::router::{RouteRequest, S3Router};

fn benchmark_route_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_shapes");

    let cases = [
        ("list_buckets", Method::GET, "/", None),
        (
            "bucket",
            Method::GET,
            "/my-bucket",
            Some("prefix=logs%2F&max-keys=100"),
        ),
        ("object", Method::PUT, "/my-bucket/2024/07/report.csv", None),
        (
            "multipart_part",
            Method::PUT,
            "/my-bucket/big.bin",
            Some("partNumber=7&uploadId=abc123"),
        ),
        ("not_found", Method::POST, "/", None),
    ];

    for (name, method, path, query) in cases {
        let req = RouteRequest::new(method, path, query);
        group.bench_function(name, |b| {
            b.iter(|| black_box(S3Router::route(black_box(&req))));
        });
    }

    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("parse_encoded_object", |b| {
        b.iter(|| {
            black_box(S3Router::parse(
                Method::GET,
                black_box("/my-bucket/some%20dir/file%2Bname.txt"),
                black_box(Some("versionId=3")),
            ))
        });
    });
}

criterion_group!(benches, benchmark_route_shapes, benchmark_parse);
criterion_main!(benches);
