//! CSA 形式の局面文字列の出力。

use crate::shogi::*;

/// 駒種の CSA 表記。内部値でインデックスする。
const KIND_NAMES: [&str; 15] = [
    "", "FU", "KY", "KE", "GI", "KA", "HI", "KI", "OU", "TO", "NY", "NK", "NG", "UM", "RY",
];

/// 手駒の出力順。
const HAND_KINDS: [PieceKind; 8] = [ROOK, BISHOP, GOLD, SILVER, KNIGHT, LANCE, PAWN, KING];

fn sign(color: Color) -> char {
    if color == BLACK {
        '+'
    } else {
        '-'
    }
}

/// (手番, 盤面, 両陣営の手駒) を CSA 形式の局面文字列にエンコードする。
/// 合法性チェックは一切行わない。
///
/// 盤面は `P1` から `P9` の 9 行(各行は９筋から１筋の順)、続いて先手、後手の手駒
/// (`P+`, `P-`, 駒ごとに `00XX`)、最後に手番 (`+` / `-`) の行が続く。
pub fn csa_encode_position(turn: Color, board: &Board, hands: &Hands) -> String {
    let mut lines = Vec::with_capacity(12);

    for row in Row::iter() {
        let mut line = format!("P{}", row.number());
        for col in Col::iter().rev() {
            let pc = board[Square::from_col_row(col, row)];
            if pc == NO_PIECE {
                line.push_str(" * ");
            } else {
                line.push(sign(pc.color()));
                line.push_str(KIND_NAMES[usize::from(pc.kind())]);
            }
        }
        lines.push(line);
    }

    for color in Color::iter() {
        let mut line = format!("P{}", sign(color));
        for pk in HAND_KINDS {
            for _ in 0..hands[color].count(pk) {
                line.push_str("00");
                line.push_str(KIND_NAMES[usize::from(pk)]);
            }
        }
        lines.push(line);
    }

    lines.push(sign(turn).to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_csa_startpos() {
        let expected = [
            "P1-KY-KE-GI-KI-OU-KI-GI-KE-KY",
            "P2 * -HI *  *  *  *  * -KA * ",
            "P3-FU-FU-FU-FU-FU-FU-FU-FU-FU",
            "P4 *  *  *  *  *  *  *  *  * ",
            "P5 *  *  *  *  *  *  *  *  * ",
            "P6 *  *  *  *  *  *  *  *  * ",
            "P7+FU+FU+FU+FU+FU+FU+FU+FU+FU",
            "P8 * +KA *  *  *  *  * +HI * ",
            "P9+KY+KE+GI+KI+OU+KI+GI+KE+KY",
            "P+",
            "P-",
            "+",
        ]
        .join("\n");

        assert_eq!(
            csa_encode_position(BLACK, &Board::startpos(), &Hands::default()),
            expected
        );
    }

    #[test]
    fn test_csa_hands_and_promoted() {
        let mut board = Board::empty();
        board[SQ_51] = W_KING;
        board[SQ_59] = B_KING;
        board[SQ_22] = B_HORSE;

        let mut hands = Hands::default();
        hands[BLACK].push(PAWN);
        hands[BLACK].push(PAWN);
        hands[WHITE].push(ROOK);

        let csa = csa_encode_position(WHITE, &board, &hands);
        let lines: Vec<_> = csa.lines().collect();

        assert_eq!(lines[1], "P2 *  *  *  *  *  *  * +UM * ");
        assert_eq!(lines[9], "P+00FU00FU");
        assert_eq!(lines[10], "P-00HI");
        assert_eq!(lines[11], "-");
    }
}
