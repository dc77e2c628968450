use criterion::{Criterion, criterion_group, criterion_main};
use common::gomoku::{GomokuSession, GomokuSettings, Side, check_win};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scattered_session(size: usize, moves: usize, seed: u64) -> GomokuSession {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = GomokuSession::new(GomokuSettings::new(size, 5));
    let mut placed = 0;
    while placed < moves && !session.is_over() {
        let x = rng.random_range(0..size);
        let y = rng.random_range(0..size);
        let side = session.to_play();
        if session.play(x, y, side).is_ok() {
            placed += 1;
        }
    }
    session
}

fn bench_check_win_empty_board(c: &mut Criterion) {
    c.bench_function("check_win_19x19_empty", |b| {
        let session = GomokuSession::new(GomokuSettings::new(19, 5));
        b.iter(|| check_win(session.board(), Side::Player1, 5));
    });
}

fn bench_check_win_mid_game(c: &mut Criterion) {
    c.bench_function("check_win_19x19_midgame", |b| {
        let session = scattered_session(19, 60, 42);
        b.iter(|| {
            check_win(session.board(), Side::Player1, 5)
                || check_win(session.board(), Side::Player2, 5)
        });
    });
}

fn bench_full_game_10x10(c: &mut Criterion) {
    c.bench_function("play_10x10_40_moves", |b| {
        b.iter(|| scattered_session(10, 40, 7));
    });
}

criterion_group!(
    benches,
    bench_check_win_empty_board,
    bench_check_win_mid_game,
    bench_full_game_10x10
);
criterion_main!(benches);
