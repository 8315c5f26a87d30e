//! 駒種ごとの動きの定義。
//!
//! オフセットは (筋の差, 段の差) で、先手から見た向きで定義する。
//! 先手の前方は段が減る向き (0, -1)。後手の駒には `Color::unit()` を掛けて使う。

use crate::shogi::*;

/// 1 マス分の動きのオフセット (筋の差, 段の差)。
pub type Offset = (i32, i32);

const U: Offset = (0, -1);
const D: Offset = (0, 1);
const L: Offset = (1, 0);
const R: Offset = (-1, 0);
const LU: Offset = (1, -1);
const LD: Offset = (1, 1);
const RU: Offset = (-1, -1);
const RD: Offset = (-1, 1);
const LUU: Offset = (1, -2);
const RUU: Offset = (-1, -2);

const ORTHOGONAL: &[Offset] = &[U, D, L, R];
const DIAGONAL: &[Offset] = &[LU, LD, RU, RD];
const GOLD_LIKE: &[Offset] = &[LU, U, RU, L, R, D];

/// 駒種の動き。
///
/// `just` は 1 回だけ動けるオフセット、`fly` は駒に当たるまで繰り返し動けるオフセット。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveDefinition {
    pub just: &'static [Offset],
    pub fly: &'static [Offset],
}

impl MoveDefinition {
    const fn new(just: &'static [Offset], fly: &'static [Offset]) -> Self {
        Self { just, fly }
    }
}

/// 指定した駒種の動きを返す。`pk` は実際の駒でなければならない。
pub fn move_definition(pk: PieceKind) -> &'static MoveDefinition {
    const NONE: &[Offset] = &[];

    #[rustfmt::skip]
    const TABLE: [MoveDefinition; 15] = [
        MoveDefinition::new(NONE, NONE),                   // NO_PIECE_KIND
        MoveDefinition::new(&[U], NONE),                   // PAWN
        MoveDefinition::new(NONE, &[U]),                   // LANCE
        MoveDefinition::new(&[LUU, RUU], NONE),            // KNIGHT
        MoveDefinition::new(&[LU, U, RU, LD, RD], NONE),   // SILVER
        MoveDefinition::new(NONE, DIAGONAL),               // BISHOP
        MoveDefinition::new(NONE, ORTHOGONAL),             // ROOK
        MoveDefinition::new(GOLD_LIKE, NONE),              // GOLD
        MoveDefinition::new(&[LU, U, RU, L, R, LD, D, RD], NONE), // KING
        MoveDefinition::new(GOLD_LIKE, NONE),              // PRO_PAWN
        MoveDefinition::new(GOLD_LIKE, NONE),              // PRO_LANCE
        MoveDefinition::new(GOLD_LIKE, NONE),              // PRO_KNIGHT
        MoveDefinition::new(GOLD_LIKE, NONE),              // PRO_SILVER
        MoveDefinition::new(ORTHOGONAL, DIAGONAL),         // HORSE
        MoveDefinition::new(DIAGONAL, ORTHOGONAL),         // DRAGON
    ];

    debug_assert!(pk.is_piece());

    &TABLE[usize::from(pk)]
}
