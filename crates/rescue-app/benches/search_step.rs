use criterion::{Criterion, criterion_group, criterion_main};
use rescue_core::game::session::GameSession;
use rescue_core::model::area::Area;
use std::hint::black_box;

fn search_throughput(c: &mut Criterion) {
    c.bench_function("conduct_search_cycle", |b| {
        let mut session = GameSession::with_seed(7);
        b.iter(|| {
            if session.game_over() {
                session.reset_game();
            }
            let _ = black_box(session.conduct_search(Area::Two));
        });
    });

    c.bench_function("view_capture", |b| {
        let session = GameSession::with_seed(7);
        b.iter(|| black_box(session.view()));
    });
}

criterion_group!(benches, search_throughput);
criterion_main!(benches);
