//! Benchmark: permission checks on the read path.
//!
//! A check clones the published `Arc` snapshots under a read lock and then
//! scans the ACLs linearly.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docguard_core::{Ace, Principal};
use docguard_perms::PermissionProvider;
use docguard_testkit::SecurityFixture;

fn bench_check_permission(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_permission");
    let fixture = SecurityFixture::new();
    let bob = Principal::new("bob").with_groups(["vps", "males"]);

    let locked = fixture.locked_document("Bubbles", "Bodie");
    let empty = fixture.empty_acp();
    group.bench_function("lock_policy_denies", |b| {
        b.iter(|| black_box(fixture.check(&locked, &empty, &bob, "Write")));
    });

    let doc = fixture.document("File");
    for size in [1usize, 16, 128] {
        // The only match is the last entry.
        let mut entries: Vec<Ace> = (0..size - 1)
            .map(|i| Ace::grant(&format!("user-{i}"), "Read"))
            .collect();
        entries.push(Ace::grant("vps", "Read"));
        let acp = fixture.acp(entries);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("acl_scan", size), &acp, |b, acp| {
            b.iter(|| black_box(fixture.check(&doc, acp, &bob, "Browse")));
        });
    }

    group.finish();
}

fn bench_permission_groups(c: &mut Criterion) {
    let fixture = SecurityFixture::new();
    let pp = fixture.service.permission_provider();

    c.bench_function("permission_groups/Browse", |b| {
        b.iter(|| black_box(pp.permission_groups("Browse")));
    });
    c.bench_function("permissions_to_check/Browse", |b| {
        b.iter(|| black_box(pp.permissions_to_check("Browse")));
    });
}

criterion_group!(benches, bench_check_permission, bench_permission_groups);
criterion_main!(benches);
