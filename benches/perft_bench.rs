use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plybot::board::Board;
use plybot::perft::perft;

fn bench_perft(c: &mut Criterion) {
    c.bench_function("perft_depth2_startpos", |b| {
        b.iter(|| {
            let mut board = Board::startpos();
            black_box(perft(&mut board, 2))
        })
    });
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
