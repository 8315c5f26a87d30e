//! 疑似合法手の生成。
//!
//! 手番や王手は考慮しない。自殺手、打ち歩詰め、連続王手の千日手も含まれる。
//! 生成される指し手はいずれも成りフラグを持たない。

use arrayvec::ArrayVec;

use crate::movedef::{move_definition, Offset};
use crate::myarray::*;
use crate::position::Position;
use crate::shogi::*;

/// 盤上の駒を動かす指し手の配列。
///
/// 1 つの駒の移動先は高々 20 マスだが、`moves_to()` で全移動元を集めることもあるので盤面全体分とっておく。
pub type MoveArray = ArrayVec<Move, 81>;

/// 駒打ちの指し手の配列。(マス数) * (手駒の駒種数) あれば足りる。
pub type DropArray = ArrayVec<Move, { 81 * 8 }>;

/// 指定したマスにある駒を動かす疑似合法手を生成する。空きマスなら空の配列を返す。
pub fn moves_from(pos: &Position, src: Square) -> MoveArray {
    let mut mvs = MoveArray::new();

    let board = pos.board();
    let pc = board[src];
    if !pc.is_piece() {
        return mvs;
    }

    let us = pc.color();
    let unit = us.unit();
    let def = move_definition(pc.kind());

    for &(dx, dy) in def.just {
        if let Some(dst) = movable_square(board, src, (unit * dx, unit * dy), us) {
            mvs.push(Move::new_walk(src, dst));
        }
    }

    for &(dx, dy) in def.fly {
        let (dx, dy) = (unit * dx, unit * dy);
        let mut cur = src;
        while let Some(dst) = movable_square(board, cur, (dx, dy), us) {
            mvs.push(Move::new_walk(src, dst));
            // 駒に当たったらそこで止まる。
            if board[dst] != NO_PIECE {
                break;
            }
            cur = dst;
        }
    }

    mvs
}

/// `sq` からオフセット `d` だけ進んだマスが盤面内で、かつ `us` の駒がなければそのマスを返す。
fn movable_square(board: &Board, sq: Square, d: Offset, us: Color) -> Option<Square> {
    let col = sq.col() + d.0;
    let row = sq.row() + d.1;
    if !(col.is_on_board() && row.is_on_board()) {
        return None;
    }

    let dst = Square::from_col_row(col, row);
    let pc = board[dst];
    (pc == NO_PIECE || pc.color() != us).then(|| dst)
}

/// 指定した陣営の手駒を打つ疑似合法手を生成する。
///
/// 二歩と行き所のない駒打ちは除外される。打ち歩詰めは除外されない。
pub fn drops_by(pos: &Position, us: Color) -> DropArray {
    let mut mvs = DropArray::new();

    let board = pos.board();
    let hand = pos.hand(us);
    if hand.is_empty() {
        return mvs;
    }

    // 自分の(成っていない)歩がある筋。
    let mut pawn_cols = MyArray1::<bool, Col, 9>::default();
    let our_pawn = Piece::new(us, PAWN);
    for sq in Square::iter().filter(|&sq| board[sq] == our_pawn) {
        pawn_cols[sq.col()] = true;
    }

    for pk in hand.kinds() {
        for dst in Square::iter() {
            if board[dst] != NO_PIECE {
                continue;
            }
            if pk == PAWN && pawn_cols[dst.col()] {
                continue;
            }
            if dst.row().rank_from_far_end(us) <= pk.dead_end_rows() {
                continue;
            }
            mvs.push(Move::new_drop(pk, dst));
        }
    }

    mvs
}

/// 指定した陣営の、指定した駒種の駒のうち、`dst` へ動ける全ての駒について、その指し手を生成する。
///
/// 棋譜の「同」や「右」「左」などの曖昧さ解消に使う。
pub fn moves_to(pos: &Position, dst: Square, pk: PieceKind, us: Color) -> MoveArray {
    let mut mvs = MoveArray::new();
    if !pk.is_piece() {
        return mvs;
    }

    let target = Piece::new(us, pk);
    let mv_of = |src| Move::new_walk(src, dst);

    for src in Square::iter().filter(|&sq| pos.board()[sq] == target) {
        if moves_from(pos, src).contains(&mv_of(src)) {
            mvs.push(mv_of(src));
        }
    }

    mvs
}

#[cfg(test)]
mod tests {
    use super::*;

    use itertools::Itertools as _;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    fn dsts(mvs: &[Move]) -> Vec<Square> {
        mvs.iter().map(|mv| mv.dst()).sorted().collect()
    }

    #[test]
    fn test_moves_from_startpos() {
        let pos = Position::new();

        assert_eq!(dsts(&moves_from(&pos, SQ_77)), vec![SQ_76]);
        assert_eq!(dsts(&moves_from(&pos, SQ_33)), vec![SQ_34]);
        assert_eq!(
            dsts(&moves_from(&pos, SQ_28)),
            vec![SQ_18, SQ_38, SQ_48, SQ_58, SQ_68, SQ_78]
        );
        assert!(moves_from(&pos, SQ_88).is_empty());
        assert!(moves_from(&pos, SQ_55).is_empty());

        assert!(moves_from(&pos, SQ_77).iter().all(|mv| !mv.is_promotion()));
    }

    #[test]
    fn test_moves_from_fly_stops_at_piece() {
        let pos = Position::from_sfen("sfen 4k4/9/9/9/4r4/9/9/4P4/4K4 w - 1").unwrap();

        let got = dsts(&moves_from(&pos, SQ_55));
        assert_eq!(got.len(), 14);
        assert!(got.contains(&SQ_58));
        assert!(!got.contains(&SQ_59));
        assert!(got.contains(&SQ_52));
        assert!(!got.contains(&SQ_51));
    }

    #[test]
    fn test_moves_from_knight_edges() {
        let pos = Position::from_sfen("sfen 4k4/9/9/9/9/9/9/9/N3K4 b - 1").unwrap();
        assert_eq!(dsts(&moves_from(&pos, SQ_99)), vec![SQ_87]);

        let pos = Position::from_sfen("sfen 4k3n/9/9/9/9/9/9/9/4K4 w - 1").unwrap();
        assert_eq!(dsts(&moves_from(&pos, SQ_11)), vec![SQ_23]);
    }

    #[test]
    fn test_drops_by() {
        // 5 筋には先手の歩があるので二歩。一段目は行き所がない。
        let pos = Position::from_sfen("sfen 4k4/9/9/9/9/9/9/4P4/4K4 b P 1").unwrap();
        let mvs = drops_by(&pos, BLACK);
        assert_eq!(mvs.len(), 64);
        assert!(mvs.iter().all(|mv| mv.dropped_piece_kind() == PAWN));
        assert!(mvs.iter().all(|mv| mv.dst().col() != COL_5));
        assert!(mvs.iter().all(|mv| mv.dst().row() != ROW_1));

        // 後手の桂は八段目、九段目に打てない。
        let pos = Position::from_sfen("sfen 4k4/9/9/9/9/9/9/9/4K4 w n 1").unwrap();
        let mvs = drops_by(&pos, WHITE);
        assert_eq!(mvs.len(), 62);
        assert!(mvs.iter().all(|mv| mv.dst().row() <= ROW_7));

        assert!(drops_by(&pos, BLACK).is_empty());
    }

    #[test]
    fn test_drops_by_promoted_pawn_is_not_double_pawn() {
        let pos = Position::from_sfen("sfen 4k4/9/9/9/9/9/9/4+P4/4K4 b P 1").unwrap();
        let mvs = drops_by(&pos, BLACK);
        assert!(mvs.contains(&Move::new_drop(PAWN, SQ_55)));
    }

    #[test]
    fn test_moves_to() {
        let pos = Position::new();

        let mvs = moves_to(&pos, SQ_58, GOLD, BLACK);
        assert_eq!(
            mvs.iter().map(|mv| mv.src()).sorted().collect::<Vec<_>>(),
            vec![SQ_49, SQ_69]
        );

        assert_eq!(
            moves_to(&pos, SQ_76, PAWN, BLACK).as_slice(),
            &[Move::new_walk(SQ_77, SQ_76)]
        );
        assert!(moves_to(&pos, SQ_76, PAWN, WHITE).is_empty());
        assert!(moves_to(&pos, SQ_55, ROOK, BLACK).is_empty());
    }
}
