use crate::position::Position;
use crate::shogi::*;

/// perft の末端ノード。`perft()` のコールバックに渡される。
#[derive(Debug)]
pub struct PerftLeafNode<'a> {
    pos: &'a Position,
    umv: Option<UndoableMove>, // 直前の指し手
    checked: bool,             // 手番の側に王手がかかっているか
}

impl<'a> PerftLeafNode<'a> {
    fn new(pos: &'a Position, umv: Option<UndoableMove>, checked: bool) -> Self {
        Self { pos, umv, checked }
    }

    /// 局面への参照を返す。
    pub fn position(&self) -> &Position {
        self.pos
    }

    /// 直前の指し手を返す。
    pub fn previous_move(&self) -> Option<UndoableMove> {
        self.umv
    }

    /// 手番の側に王手がかかっているかどうかを返す。
    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

/// 指定した深さの perft を行う。全ての末端ノードについてコールバックが呼ばれる。
///
/// 指した側の玉に王手がかかる手(自殺手)は除外する。
/// 打ち歩詰めと連続王手の千日手は除外しない。
///
/// 関数から戻ったとき、`pos` は呼び出し前の局面に戻っている。
pub fn perft<F>(pos: &mut Position, depth: u32, mut f: F)
where
    F: FnMut(&PerftLeafNode),
{
    perft_dfs(pos, None, depth, &mut f);
}

fn perft_dfs<F>(pos: &mut Position, umv: Option<UndoableMove>, depth: u32, f: &mut F)
where
    F: FnMut(&PerftLeafNode),
{
    if depth == 0 {
        let checked = pos.is_check(pos.turn());
        f(&PerftLeafNode::new(pos, umv, checked));
        return;
    }

    let us = pos.turn();

    for mv in generate_moves(pos) {
        // 生成した手は全て疑似合法手なので do_move(), undo_move() は失敗しない。
        let umv_nxt = pos
            .do_move(mv)
            .unwrap_or_else(|e| panic!("generated move {:?} was rejected: {}", mv, e));

        if !pos.is_check(us) {
            perft_dfs(pos, Some(umv_nxt), depth - 1, f);
        }

        pos.undo_move(umv_nxt)
            .unwrap_or_else(|e| panic!("cannot undo {:?}: {}", umv_nxt, e));
    }
}

/// 手番の側の疑似合法手を、成/不成の両方を展開して生成する。
pub fn generate_moves(pos: &Position) -> Vec<Move> {
    let us = pos.turn();

    let mut mvs = Vec::with_capacity(128);

    for src in Square::iter() {
        let pc = pos.get(src);
        if pc == NO_PIECE || pc.color() != us {
            continue;
        }

        let pk = pc.kind();
        for mv in pos.moves_from(src) {
            let dst = mv.dst();

            let can_promote =
                pk.is_promotable() && (src.is_promotion_zone(us) || dst.is_promotion_zone(us));
            let must_promote = dst.row().rank_from_far_end(us) <= pk.dead_end_rows();

            if can_promote {
                mvs.push(Move::new_walk_promotion(src, dst));
            }
            if !must_promote {
                mvs.push(mv);
            }
        }
    }

    mvs.extend(pos.drops_by(us));

    mvs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_generate_moves_startpos() {
        let pos = Position::new();
        assert_eq!(generate_moves(&pos).len(), 30);
    }

    #[test]
    fn test_generate_moves_promotion_choices() {
        // 歩は三段目へなら成/不成、一段目へなら成のみ。
        let pos = Position::from_sfen("sfen 4k4/P8/2P6/9/9/9/9/9/4K4 b - 1").unwrap();
        let mvs = generate_moves(&pos);

        assert!(mvs.contains(&Move::new_walk_promotion(SQ_92, SQ_91)));
        assert!(!mvs.contains(&Move::new_walk(SQ_92, SQ_91)));
        assert!(mvs.contains(&Move::new_walk_promotion(SQ_73, SQ_72)));
        assert!(mvs.contains(&Move::new_walk(SQ_73, SQ_72)));
    }

    #[test]
    fn test_perft_restores_position() {
        let mut pos = Position::new();
        let orig = pos.clone();

        let mut count = 0;
        perft(&mut pos, 2, |_| count += 1);

        assert_eq!(count, 900);
        assert_eq!(pos, orig);
    }
}
