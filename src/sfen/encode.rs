use crate::shogi::*;

use super::{char_from_piece, KIND_CHARS};

/// (手番, 盤面, 両陣営の手駒, 指し手の配列) を USI の position コマンド引数形式にエンコードする。
/// 合法性チェックは一切行わない。
///
/// 結果は `sfen <局面> moves <指し手>...` の形になり、`sfen_decode()` で読み戻せる。
pub fn sfen_encode<T>(turn: Color, board: &Board, hands: &Hands, move_count: u32, mvs: T) -> String
where
    T: AsRef<[Move]>,
{
    let mut s = String::from("sfen ");
    s.push_str(&sfen_encode_position(turn, board, hands, move_count));

    let mvs = mvs.as_ref();
    if !mvs.is_empty() {
        s.push_str(" moves");
        for &mv in mvs {
            s.push(' ');
            encode_move(mv, &mut s);
        }
    }

    s
}

/// (手番, 盤面, 両陣営の手駒, 手数) を sfen 局面文字列にエンコードする。
/// 合法性チェックは一切行わない。
///
/// 結果は `<盤面> <b|w> <手駒|-> <手数>` の形で、先頭に "sfen" は付かない。
pub fn sfen_encode_position(turn: Color, board: &Board, hands: &Hands, move_count: u32) -> String {
    let mut s = String::with_capacity(96);

    for row in Row::iter() {
        if row != ROW_1 {
            s.push('/');
        }
        encode_board_row(board, row, &mut s);
    }

    s.push(' ');
    s.push(if turn == BLACK { 'b' } else { 'w' });

    s.push(' ');
    encode_hands(hands, &mut s);

    s.push(' ');
    s.push_str(&move_count.to_string());

    s
}

/// 盤面の 1 段分を９筋から１筋の順にエンコードする。空きマスの連続は数字 1 文字にまとめる。
fn encode_board_row(board: &Board, row: Row, s: &mut String) {
    let mut blank = 0;

    for col in Col::iter().rev() {
        let pc = board[Square::from_col_row(col, row)];
        if pc == NO_PIECE {
            blank += 1;
            continue;
        }

        push_blank(&mut blank, s);
        if pc.is_promoted() {
            s.push('+');
        }
        s.push(char_from_piece(pc));
    }

    push_blank(&mut blank, s);
}

fn push_blank(blank: &mut u32, s: &mut String) {
    if *blank > 0 {
        s.push_str(&blank.to_string());
        *blank = 0;
    }
}

/// 手駒は先手、後手の順。駒種は (玉,) 飛, 角, 金, 銀, 桂, 香, 歩 の順。
fn encode_hands(hands: &Hands, s: &mut String) {
    if hands.iter().all(Hand::is_empty) {
        s.push('-');
        return;
    }

    for color in Color::iter() {
        for &(pk, _) in &KIND_CHARS {
            let n = hands[color].count(pk);
            if n == 0 {
                continue;
            }
            if n >= 2 {
                s.push_str(&n.to_string());
            }
            s.push(char_from_piece(Piece::new(color, pk)));
        }
    }
}

/// 指し手を USI 形式の指し手文字列にエンコードする。
/// 合法性チェックは一切行わない。
pub fn sfen_encode_move(mv: Move) -> String {
    let mut s = String::with_capacity(5);

    encode_move(mv, &mut s);

    s
}

fn encode_move(mv: Move, s: &mut String) {
    if mv.is_drop() {
        s.push(char_from_piece(Piece::new(BLACK, mv.dropped_piece_kind())));
        s.push('*');
        encode_square(mv.dst(), s);
    } else {
        encode_square(mv.src(), s);
        encode_square(mv.dst(), s);
        if mv.is_promotion() {
            s.push('+');
        }
    }
}

fn encode_square(sq: Square, s: &mut String) {
    const ROWS: [char; 9] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];

    s.push_str(&sq.x().to_string());
    s.push(ROWS[usize::from(sq.row())]);
}
