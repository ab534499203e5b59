use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;

use blogpad::auth::{SessionManager, SessionToken};

fn bench_start_session(c: &mut Criterion) {
    let sessions = SessionManager::new(b"bench-secret", Duration::from_secs(3600), "blogpad_session");

    c.bench_function("start_session", |b| {
        b.iter(|| sessions.start_session(black_box(42)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let sessions = SessionManager::new(b"bench-secret", Duration::from_secs(3600), "blogpad_session");
    let token = sessions
        .start_session(42)
        .expect("Failed to start session");
    let garbage = SessionToken::from_raw("not.a.token");

    c.bench_function("resolve_valid", |b| {
        b.iter(|| sessions.resolve(black_box(&token)))
    });

    c.bench_function("resolve_garbage", |b| {
        b.iter(|| sessions.resolve(black_box(&garbage)))
    });
}

fn bench_password_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("bcrypt");
    group.sample_size(10);

    for cost in [4, 8, 10] {
        group.bench_function(format!("hash_cost_{}", cost), |b| {
            b.iter(|| bcrypt::hash(black_box("s3cret"), cost))
        });
    }

    let hash = bcrypt::hash("s3cret", 4).expect("Failed to hash");
    group.bench_function("verify_cost_4", |b| {
        b.iter(|| bcrypt::verify(black_box("s3cret"), &hash))
    });

    group.finish();
}

criterion_group!(benches, bench_start_session, bench_resolve, bench_password_hash);
criterion_main!(benches);
