use std::iter::Peekable;
use std::str::SplitAsciiWhitespace;

use anyhow::{bail, ensure, Context as _};

use crate::shogi::*;

use super::piece_from_char;

type Tokens<'a> = Peekable<SplitAsciiWhitespace<'a>>;

/// sfen 文字列をデコードし、(手番, 盤面, 両陣営の手駒, 指し手の配列) を返す。
/// 構文はチェックするが、合法性チェックは一切行わない。
///
/// 受理する形式は `[position] (startpos | [sfen] <盤面> <手番> <手駒> [<手数>]) [moves <指し手>...]`。
pub fn sfen_decode(s: impl AsRef<str>) -> anyhow::Result<(Color, Board, Hands, Vec<Move>)> {
    let mut tokens = s.as_ref().split_ascii_whitespace().peekable();

    let (turn, board, hands) = decode_position_tokens(&mut tokens)?;

    let mvs = match tokens.next() {
        None => vec![],
        Some("moves") => tokens
            .map(sfen_decode_move)
            .collect::<anyhow::Result<_>>()?,
        Some(token) => bail!(r#""moves" expected, but got {}"#, token),
    };

    Ok((turn, board, hands, mvs))
}

/// sfen 局面文字列をデコードし、(手番, 盤面, 両陣営の手駒) を返す。
/// 構文はチェックするが、合法性チェックは一切行わない。
///
/// 指し手を含む文字列は受け付けない。
pub fn sfen_decode_position(s: impl AsRef<str>) -> anyhow::Result<(Color, Board, Hands)> {
    let mut tokens = s.as_ref().split_ascii_whitespace().peekable();

    let position = decode_position_tokens(&mut tokens)?;

    if let Some(token) = tokens.next() {
        bail!("position string has redundant token: {}", token);
    }

    Ok(position)
}

fn decode_position_tokens(tokens: &mut Tokens) -> anyhow::Result<(Color, Board, Hands)> {
    // 外部アプリは "position" や "sfen" を付けたり付けなかったりまちまち。
    let _ = tokens.next_if_eq(&"position");

    if tokens.next_if_eq(&"startpos").is_some() {
        return Ok((BLACK, Board::startpos(), Hands::default()));
    }

    let _ = tokens.next_if_eq(&"sfen");

    let board = decode_board(tokens.next().context("board field not found")?)?;
    let turn = decode_turn(tokens.next().context("side-to-move field not found")?)?;
    let hands = decode_hands(tokens.next().context("hands field not found")?)?;

    if let Some(s) = tokens.next_if(|&token| token != "moves") {
        decode_move_count(s)?;
    }

    Ok((turn, board, hands))
}

fn decode_board(s: &str) -> anyhow::Result<Board> {
    let rows: Vec<&str> = s.split('/').collect();
    ensure!(rows.len() == 9, "board must have exactly 9 rows: {}", s);

    let mut board = Board::empty();
    for (row, row_s) in Row::iter().zip(rows) {
        decode_board_row(row_s, row, &mut board)
            .with_context(|| format!("invalid board row: {}", row_s))?;
    }

    Ok(board)
}

/// 盤面の 1 段分をデコードする。９筋から１筋の順に並んでいる。
fn decode_board_row(s: &str, row: Row, board: &mut Board) -> anyhow::Result<()> {
    // 次に埋める筋の番号。
    let mut x = 9;
    let mut promo = false;

    for c in s.chars() {
        if c == '+' {
            ensure!(!promo, "consecutive '+'");
            promo = true;
            continue;
        }

        if let Some(n) = c.to_digit(10) {
            ensure!(!promo, "'+' before digit");
            ensure!(n >= 1, "blank count must be positive");
            x -= n as i32;
            ensure!(x >= 0, "row has more than 9 columns");
            continue;
        }

        let mut pc = piece_from_char(c).with_context(|| format!("invalid piece char: {}", c))?;
        if promo {
            ensure!(pc.is_promotable(), "piece is not promotable: {}", c);
            pc.promote();
            promo = false;
        }

        let sq = Square::new(x, row.number()).context("row has more than 9 columns")?;
        board[sq] = pc;
        x -= 1;
    }

    ensure!(!promo, "dangling '+'");
    ensure!(x == 0, "row must have exactly 9 columns");

    Ok(())
}

fn decode_turn(s: &str) -> anyhow::Result<Color> {
    match s {
        "b" => Ok(BLACK),
        "w" => Ok(WHITE),
        _ => bail!("invalid side to move: {}", s),
    }
}

/// 手駒をデコードする。枚数は駒の前に 10 進で書かれる。
fn decode_hands(s: &str) -> anyhow::Result<Hands> {
    let mut hands = Hands::default();
    if s == "-" {
        return Ok(hands);
    }

    let mut count: Option<u32> = None;
    for c in s.chars() {
        if let Some(d) = c.to_digit(10) {
            ensure!(count.is_some() || d != 0, "leading zero in hand count");
            let n = count
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(d))
                .context("hand count is too large")?;
            count = Some(n);
            continue;
        }

        let pc = piece_from_char(c).with_context(|| format!("invalid hand piece char: {}", c))?;

        let n = count.take().unwrap_or(1);
        let hand = &mut hands[pc.color()];
        hand[pc.kind()] = hand[pc.kind()]
            .checked_add(n)
            .context("hand count is too large")?;
    }

    ensure!(count.is_none(), "hand count without piece");

    Ok(hands)
}

fn decode_move_count(s: &str) -> anyhow::Result<u32> {
    let n: u32 = s
        .parse()
        .with_context(|| format!("invalid move count: {}", s))?;
    ensure!(n >= 1, "move count must be positive");

    Ok(n)
}

/// USI 形式の指し手文字列をデコードし、その指し手を返す。
/// 構文はチェックするが、合法性チェックは一切行わない。
///
/// 駒を動かす手は `7g7f`, `8h2b+`、駒打ちは `P*5e` のように書く。
pub fn sfen_decode_move(s: impl AsRef<str>) -> anyhow::Result<Move> {
    let s = s.as_ref().trim();
    let cs: Vec<char> = s.chars().collect();

    let mv = match cs.as_slice() {
        &[x1, y1, x2, y2] | &[x1, y1, x2, y2, '+'] => {
            let src = decode_square(x1, y1);
            let dst = decode_square(x2, y2);
            let promo = cs.len() == 5;
            match (src, dst) {
                (Some(src), Some(dst)) if promo => Move::new_walk_promotion(src, dst),
                (Some(src), Some(dst)) => Move::new_walk(src, dst),
                _ => bail!("invalid move string: {}", s),
            }
        }
        &[c, '*', x, y] => {
            let pk = piece_from_char(c)
                .filter(|_| c.is_ascii_uppercase())
                .map(|pc| pc.kind());
            match (pk, decode_square(x, y)) {
                (Some(pk), Some(dst)) => Move::new_drop(pk, dst),
                _ => bail!("invalid drop string: {}", s),
            }
        }
        _ => bail!("invalid move string: {}", s),
    };

    Ok(mv)
}

/// 筋 '1'..='9'、段 'a'..='i' からマスを得る。
fn decode_square(x: char, y: char) -> Option<Square> {
    let x = x.to_digit(10)?;
    if !('a'..='i').contains(&y) {
        return None;
    }
    let y = u32::from(y) - u32::from('a') + 1;

    Square::new(x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_decode_startpos() {
        let expected = (BLACK, Board::startpos(), Hands::default());

        assert_eq!(sfen_decode_position("startpos").unwrap(), expected);
        assert_eq!(
            sfen_decode_position("position startpos").unwrap(),
            expected
        );
        assert_eq!(
            sfen_decode_position(
                "sfen lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1"
            )
            .unwrap(),
            expected
        );
        assert_eq!(
            sfen_decode_position("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b -")
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_decode_hands() {
        let (_, _, hands) =
            sfen_decode_position("sfen 4k4/9/9/9/9/9/9/9/4K4 b 2RB10Pk3p 1").unwrap();

        assert_eq!(hands[BLACK].count(ROOK), 2);
        assert_eq!(hands[BLACK].count(BISHOP), 1);
        assert_eq!(hands[BLACK].count(PAWN), 10);
        assert_eq!(hands[WHITE].count(KING), 1);
        assert_eq!(hands[WHITE].count(PAWN), 3);
    }

    #[test]
    fn test_decode_moves() {
        let (turn, board, _, mvs) = sfen_decode("position startpos moves 7g7f 3c3d 8h2b+ B*4e").unwrap();

        assert_eq!(turn, BLACK);
        assert_eq!(board, Board::startpos());
        assert_eq!(
            mvs,
            vec![
                Move::new_walk(SQ_77, SQ_76),
                Move::new_walk(SQ_33, SQ_34),
                Move::new_walk_promotion(SQ_88, SQ_22),
                Move::new_drop(BISHOP, SQ_45),
            ]
        );
    }

    #[test]
    fn test_decode_promoted_piece() {
        let (_, board, _) = sfen_decode_position("sfen 4k4/9/9/9/4+r4/9/9/9/4K4 b - 1").unwrap();
        assert_eq!(board[SQ_55], W_DRAGON);
    }

    #[test]
    fn test_decode_errors() {
        for s in [
            "",
            "position",
            "sfen",
            "sfen 4k4/9/9/9/9/9/9/4K4 b - 1",
            "sfen 4k4/9/9/9/9/9/9/9/9/4K4 b - 1",
            "sfen 4k5/9/9/9/9/9/9/9/4K4 b - 1",
            "sfen 4k3/9/9/9/9/9/9/9/4K4 b - 1",
            "sfen 4+k4/9/9/9/9/9/9/9/4K4 b - 1",
            "sfen 4k3+/9/9/9/9/9/9/9/4K4 b - 1",
            "sfen 4k4/9/9/9/9/9/9/9/4K4 x - 1",
            "sfen 4k4/9/9/9/9/9/9/9/4K4 b 2 1",
            "sfen 4k4/9/9/9/9/9/9/9/4K4 b 02P 1",
            "sfen 4k4/9/9/9/9/9/9/9/4K4 b +P 1",
            "sfen 4k4/9/9/9/9/9/9/9/4K4 b - 0",
            "sfen 4k4/9/9/9/9/9/9/9/4K4 b - 1 foo",
            "sfen 4x4/9/9/9/9/9/9/9/4K4 b - 1",
        ] {
            assert!(sfen_decode(s).is_err(), "{}", s);
        }

        assert!(sfen_decode_position("startpos moves 7g7f").is_err());
    }

    #[test]
    fn test_decode_move_errors() {
        for s in ["", "7g", "7g7", "7g7f=", "0a1b", "7j7f", "p*5e", "X*5e", "P*5", "P+5e"] {
            assert!(sfen_decode_move(s).is_err(), "{}", s);
        }
    }
}
