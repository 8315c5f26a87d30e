use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shogi_position::*;

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    c.bench_function("perft_startpos_2", |b| b.iter(|| perft_count(black_box(2))));

    let pos = Position::from_sfen(
        "sfen l6nl/1r3kg2/p2pppsp1/2p3p1p/1p3P3/2P1P1P1P/PPSP1GN2/2G1K2R1/LN6L b BGSNPbs2p 1",
    )
    .unwrap();

    c.bench_function("generate_moves_midgame", |b| {
        b.iter(|| generate_moves(black_box(&pos)))
    });
    c.bench_function("is_check_midgame", |b| {
        b.iter(|| black_box(&pos).is_check(BLACK))
    });
}

fn perft_count(depth: u32) -> u64 {
    let mut pos = Position::new();

    let mut count = 0;
    perft(&mut pos, depth, |_| count += 1);

    count
}
