use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vaporzone::routes::{decide, RouteTable};
use vaporzone::session::{MemoryStore, Session, SessionState};

fn bench_decide(c: &mut Criterion) {
    let table = RouteTable::default();
    let anonymous = Session::default();
    let authed = Session {
        token: Some("abc".to_string()),
        user: Some("alice".to_string()),
    };

    c.bench_function("decide_login", |b| {
        b.iter(|| decide(&table, black_box("/login"), &anonymous))
    });

    c.bench_function("decide_gated_redirect", |b| {
        b.iter(|| decide(&table, black_box("/contabilidad"), &anonymous))
    });

    c.bench_function("decide_gated_render", |b| {
        b.iter(|| decide(&table, black_box("/transacciones"), &authed))
    });

    c.bench_function("decide_catch_all", |b| {
        b.iter(|| decide(&table, black_box("/no-such-page"), &authed))
    });
}

fn bench_session(c: &mut Criterion) {
    let state = SessionState::initialize(MemoryStore::new());

    c.bench_function("session_login_logout", |b| {
        b.iter(|| {
            state.login(black_box("abc"), Some("alice"));
            state.logout();
        })
    });

    state.login("abc", Some("alice"));
    c.bench_function("session_snapshot", |b| b.iter(|| black_box(state.current())));
}

criterion_group!(benches, bench_decide, bench_session);
criterion_main!(benches);
