use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use jsonwebtoken::Algorithm;
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::mock::MockUserStore;
use service::auth::service::{AuthService, AuthConfig};

fn bench_login(c: &mut Criterion) {
    let store = Arc::new(MockUserStore::default());
    let cfg = AuthConfig {
        jwt_secret: "bench-secret".into(),
        algorithm: Algorithm::HS256,
        access_ttl_secs: 1800,
        refresh_ttl_secs: 604_800,
        argon2_memory_kib: 19456,
        argon2_iterations: 2,
        argon2_parallelism: 1,
    };
    let svc = AuthService::new(store, cfg).expect("config");

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        email: "bench@example.com".into(),
        password: "Benchmark1".into(),
        full_name: Some("Bench".into()),
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() }))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
