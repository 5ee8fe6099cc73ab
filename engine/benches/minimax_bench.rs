use std::time::Duration;

use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};

use vanishing_ttt::{
    BotInput, GameMode, GameSession, Mark, MoveHistory, MoveRecord, SessionPhase, calculate_move,
    empty_board,
};

fn input_of(moves: &[(Mark, usize)], bot_mark: Mark) -> BotInput {
    let mut board = empty_board();
    let mut history = MoveHistory::default();
    for (seq, &(mark, cell)) in moves.iter().enumerate() {
        board[cell] = mark;
        history.push(mark, MoveRecord { cell, seq: seq as u64 });
    }
    BotInput {
        board,
        history,
        bot_mark,
    }
}

fn bench_single_move_mid_game() {
    // Center held by the bot, no short-circuit applies: full placement
    // search.
    let input = input_of(&[(Mark::X, 0), (Mark::O, 4), (Mark::X, 8)], Mark::O);
    calculate_move(&input);
}

fn bench_single_move_relocation_phase() {
    // Both sides at the piece cap: the search enumerates relocations.
    let input = input_of(
        &[
            (Mark::X, 0),
            (Mark::O, 1),
            (Mark::X, 2),
            (Mark::O, 4),
            (Mark::X, 3),
            (Mark::O, 5),
            (Mark::X, 7),
            (Mark::O, 6),
        ],
        Mark::O,
    );
    calculate_move(&input);
}

fn bench_full_bot_game() {
    // Human plays a fixed policy (lowest empty cell), bot answers, until
    // the game ends or the iteration cap is hit.
    let mut session = GameSession::new();
    session.select_mode(GameMode::SingleBot);

    for _ in 0..30 {
        if session.phase() != SessionPhase::InProgress {
            break;
        }
        if session.is_bot_turn() {
            if let Some(index) = session.request_bot_move() {
                let _ = session.apply_bot_move(index);
            }
        } else {
            let board = session.game().board;
            if let Some(index) = (0..board.len()).find(|&i| board[i] == Mark::Empty) {
                let _ = session.apply_human_move(index);
            }
        }
    }
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(60));

    group.bench_function("single_move_mid_game", |b| {
        b.iter(bench_single_move_mid_game)
    });

    group.bench_function("single_move_relocation_phase", |b| {
        b.iter(bench_single_move_relocation_phase)
    });

    group.bench_function("full_bot_game", |b| b.iter(bench_full_bot_game));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
