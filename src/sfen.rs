//! sfen 形式の局面文字列、および USI 形式の指し手文字列の変換。
//!
//! 手駒の 'K', 'k' (玉) は独自拡張。このレイヤーでは玉を取る手も指せるため。

mod decode;
mod encode;

pub use self::decode::*;
pub use self::encode::*;

use crate::shogi::*;

/// 駒種と sfen 文字(先手側、大文字)の対応。手駒の出力順でもある。
const KIND_CHARS: [(PieceKind, char); 8] = [
    (KING, 'K'),
    (ROOK, 'R'),
    (BISHOP, 'B'),
    (GOLD, 'G'),
    (SILVER, 'S'),
    (KNIGHT, 'N'),
    (LANCE, 'L'),
    (PAWN, 'P'),
];

/// sfen 文字を陣営つきの駒に変換する。大文字なら先手、小文字なら後手。
fn piece_from_char(c: char) -> Option<Piece> {
    let color = if c.is_ascii_uppercase() { BLACK } else { WHITE };
    let c = c.to_ascii_uppercase();

    KIND_CHARS
        .iter()
        .find(|&&(_, ch)| ch == c)
        .map(|&(pk, _)| Piece::new(color, pk))
}

/// 成っていない駒を sfen 文字に変換する。
fn char_from_piece(pc: Piece) -> char {
    let pk = pc.kind().to_unpromoted();
    let c = KIND_CHARS
        .iter()
        .find(|&&(pk2, _)| pk2 == pk)
        .map_or('?', |&(_, ch)| ch);

    if pc.color() == BLACK {
        c
    } else {
        c.to_ascii_lowercase()
    }
}
