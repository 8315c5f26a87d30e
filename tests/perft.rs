#[allow(unused_imports)]
use pretty_assertions::{assert_eq, assert_ne};

use shogi_position::*;

#[derive(Debug, Default, Eq, PartialEq)]
struct PerftStats {
    count_all: u64,
    count_capture: u64,
    count_promote: u64,
    count_check: u64,
}

fn do_perft(pos: &mut Position, depth: u32) -> PerftStats {
    let mut stats = PerftStats::default();

    perft(pos, depth, |leaf| {
        stats.count_all += 1;

        if let Some(umv) = leaf.previous_move() {
            if !umv.is_drop() {
                if umv.captured_kind().is_some() {
                    stats.count_capture += 1;
                }
                if umv.is_promotion() {
                    stats.count_promote += 1;
                }
            }
        }

        if leaf.is_checked() {
            stats.count_check += 1;
        }
    });

    stats
}

/// 平手初期局面からの perft が既知の結果と一致するかテストする。
///
/// ref:
///
/// * [将棋でPerftしてみたまとめ - Qiita](https://qiita.com/ak11/items/8bd5f2bb0f5b014143c8)
#[test]
fn test_perft_startpos() {
    let mut pos = Position::from_sfen("startpos").unwrap();
    let orig = pos.clone();

    assert_eq!(
        do_perft(&mut pos, 1),
        PerftStats {
            count_all: 30,
            count_capture: 0,
            count_promote: 0,
            count_check: 0,
        }
    );

    assert_eq!(
        do_perft(&mut pos, 2),
        PerftStats {
            count_all: 900,
            count_capture: 0,
            count_promote: 0,
            count_check: 0,
        }
    );

    assert_eq!(
        do_perft(&mut pos, 3),
        PerftStats {
            count_all: 25470,
            count_capture: 59,
            count_promote: 30,
            count_check: 48,
        }
    );

    assert_eq!(pos, orig);
}

/// 時間がかかるので `#[ignore]` を付けてある。実行する際はリリースモードにすること。
#[test]
#[ignore]
fn test_perft_startpos_depth4() {
    let mut pos = Position::new();

    assert_eq!(
        do_perft(&mut pos, 4),
        PerftStats {
            count_all: 719731,
            count_capture: 1803,
            count_promote: 842,
            count_check: 1121,
        }
    );
}
