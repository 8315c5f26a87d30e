//! 将棋の基本要素たち。
//!
//! 駒などは enum ではなく、いわゆる newtype で表現する。
//! 成駒を OR 一発で求められるよう駒種の内部値を割り当てているので、enum だと扱いにくい。
//!
//! 筋、段、マスの内部値は以下のように割り当てている:
//!
//! * 筋は１筋, ２筋, ..., ９筋の順。
//! * 段は一段目, 二段目, ..., 九段目の順。先手は一段目に向かって進む。
//! * マスは１一, １二, ..., ９九の順。
//!
//! 外部とのやりとりでは、筋と段を 1 始まりの整数 (x, y) で表す。

use std::iter::FusedIterator;

use crate::myarray::*;

/// `Col`, `Row` に整数を加算/減算できるようにする。
/// 駒の動きのオフセットを足した結果は盤外になりうるので、使う側で `is_on_board()` を確認すること。
macro_rules! impl_coord_ops {
    ($t:ty) => {
        impl ::std::ops::Add<i32> for $t {
            type Output = $t;

            fn add(self, rhs: i32) -> Self::Output {
                Self(self.0 + rhs)
            }
        }

        impl ::std::ops::AddAssign<i32> for $t {
            fn add_assign(&mut self, rhs: i32) {
                self.0 += rhs;
            }
        }

        impl ::std::ops::Sub<i32> for $t {
            type Output = $t;

            fn sub(self, rhs: i32) -> Self::Output {
                Self(self.0 - rhs)
            }
        }

        impl ::std::ops::SubAssign<i32> for $t {
            fn sub_assign(&mut self, rhs: i32) {
                self.0 -= rhs;
            }
        }

        impl ::std::ops::Sub<$t> for $t {
            type Output = i32;

            fn sub(self, rhs: $t) -> i32 {
                self.0 - rhs.0
            }
        }

        impl From<$t> for i32 {
            fn from(x: $t) -> Self {
                x.0
            }
        }

        impl From<$t> for usize {
            fn from(x: $t) -> Self {
                debug_assert!(x.is_on_board());

                x.0 as Self
            }
        }
    };
}

/// 陣営。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Color(u32);

/// 先手。
pub const BLACK: Color = Color(0);
/// 後手。
pub const WHITE: Color = Color(1);

impl Color {
    /// 有効値かどうかを返す。
    pub const fn is_valid(self) -> bool {
        self.0 == BLACK.0 || self.0 == WHITE.0
    }

    /// 相手の陣営を返す。
    pub const fn inv(self) -> Color {
        Self(self.0 ^ 1)
    }

    /// 駒の動きの向きを返す。先手なら 1, 後手なら -1。
    ///
    /// 駒の動きは先手から見た向きで定義されているので、これを掛けて使う。
    pub const fn unit(self) -> i32 {
        if self.0 == BLACK.0 {
            1
        } else {
            -1
        }
    }

    /// 陣営を昇順に列挙する。(`BLACK`、`WHITE` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        [BLACK, WHITE].into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl From<Color> for usize {
    fn from(color: Color) -> Self {
        debug_assert!(color.is_valid());

        color.0 as Self
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            BLACK => write!(f, "BLACK"),
            WHITE => write!(f, "WHITE"),
            _ => write!(f, "Color({})", self.0),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            BLACK => write!(f, "先手"),
            WHITE => write!(f, "後手"),
            color => write!(f, "無効な陣営({})", color.0),
        }
    }
}

/// 盤面の筋。たとえば `COL_3` は３筋。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Col(i32);

pub const COL_1: Col = Col(0);
pub const COL_2: Col = Col(1);
pub const COL_3: Col = Col(2);
pub const COL_4: Col = Col(3);
pub const COL_5: Col = Col(4);
pub const COL_6: Col = Col(5);
pub const COL_7: Col = Col(6);
pub const COL_8: Col = Col(7);
pub const COL_9: Col = Col(8);

impl Col {
    /// 1 始まりの筋番号から筋を作る。盤面外なら `None` を返す。
    pub const fn from_number(x: i32) -> Option<Self> {
        let this = Self(x - 1);
        if this.is_on_board() {
            Some(this)
        } else {
            None
        }
    }

    /// 筋が盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        COL_1.0 <= self.0 && self.0 <= COL_9.0
    }

    /// 1 始まりの筋番号を返す。
    pub const fn number(self) -> i32 {
        self.0 + 1
    }

    /// 全ての筋を昇順に列挙する。(`COL_1`, `COL_2`, ..., `COL_9` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        (COL_1.0..COL_9.0 + 1).map(Self)
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl_coord_ops!(Col);

impl std::fmt::Debug for Col {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "COL_{}", self.number())
        } else {
            write!(f, "Col({})", self.0)
        }
    }
}

impl std::fmt::Display for Col {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const NAMES: [&str; 9] = ["１", "２", "３", "４", "５", "６", "７", "８", "９"];

        if self.is_on_board() {
            f.write_str(NAMES[self.0 as usize])
        } else {
            write!(f, "無効な筋({})", self.0)
        }
    }
}

/// 盤面の段。たとえば `ROW_3` は三段目。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Row(i32);

pub const ROW_1: Row = Row(0);
pub const ROW_2: Row = Row(1);
pub const ROW_3: Row = Row(2);
pub const ROW_4: Row = Row(3);
pub const ROW_5: Row = Row(4);
pub const ROW_6: Row = Row(5);
pub const ROW_7: Row = Row(6);
pub const ROW_8: Row = Row(7);
pub const ROW_9: Row = Row(8);

impl Row {
    /// 1 始まりの段番号から段を作る。盤面外なら `None` を返す。
    pub const fn from_number(y: i32) -> Option<Self> {
        let this = Self(y - 1);
        if this.is_on_board() {
            Some(this)
        } else {
            None
        }
    }

    /// 段が盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        ROW_1.0 <= self.0 && self.0 <= ROW_9.0
    }

    /// 1 始まりの段番号を返す。
    pub const fn number(self) -> i32 {
        self.0 + 1
    }

    /// 段が指定した陣営にとって敵陣かどうかを返す。
    pub const fn is_promotion_zone(self, color: Color) -> bool {
        if color.0 == BLACK.0 {
            self.0 <= ROW_3.0
        } else {
            self.0 >= ROW_7.0
        }
    }

    /// 指定した陣営から見て、敵陣の最奥を 1 として数えた段数を返す。
    ///
    /// 先手なら段番号そのもの、後手なら `10 - 段番号` となる。
    pub const fn rank_from_far_end(self, color: Color) -> i32 {
        if color.0 == BLACK.0 {
            self.number()
        } else {
            10 - self.number()
        }
    }

    /// 全ての段を昇順に列挙する。(`ROW_1`, `ROW_2`, ..., `ROW_9` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        (ROW_1.0..ROW_9.0 + 1).map(Self)
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl_coord_ops!(Row);

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "ROW_{}", self.number())
        } else {
            write!(f, "Row({})", self.0)
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const NAMES: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

        if self.is_on_board() {
            f.write_str(NAMES[self.0 as usize])
        } else {
            write!(f, "無効な段({})", self.0)
        }
    }
}

/// 盤面のマス。たとえば `SQ_45` は４五。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Square(i32);

/// マス定数を内部値の昇順に定義する。
macro_rules! define_squares {
    ($first:ident $(, $rest:ident)* $(,)?) => {
        pub const $first: Square = Square(0);
        define_squares!(@next $first $(, $rest)*);
    };
    (@next $prev:ident, $cur:ident $(, $rest:ident)*) => {
        pub const $cur: Square = Square($prev.0 + 1);
        define_squares!(@next $cur $(, $rest)*);
    };
    (@next $prev:ident) => {};
}

#[rustfmt::skip]
define_squares!(
    SQ_11, SQ_12, SQ_13, SQ_14, SQ_15, SQ_16, SQ_17, SQ_18, SQ_19,
    SQ_21, SQ_22, SQ_23, SQ_24, SQ_25, SQ_26, SQ_27, SQ_28, SQ_29,
    SQ_31, SQ_32, SQ_33, SQ_34, SQ_35, SQ_36, SQ_37, SQ_38, SQ_39,
    SQ_41, SQ_42, SQ_43, SQ_44, SQ_45, SQ_46, SQ_47, SQ_48, SQ_49,
    SQ_51, SQ_52, SQ_53, SQ_54, SQ_55, SQ_56, SQ_57, SQ_58, SQ_59,
    SQ_61, SQ_62, SQ_63, SQ_64, SQ_65, SQ_66, SQ_67, SQ_68, SQ_69,
    SQ_71, SQ_72, SQ_73, SQ_74, SQ_75, SQ_76, SQ_77, SQ_78, SQ_79,
    SQ_81, SQ_82, SQ_83, SQ_84, SQ_85, SQ_86, SQ_87, SQ_88, SQ_89,
    SQ_91, SQ_92, SQ_93, SQ_94, SQ_95, SQ_96, SQ_97, SQ_98, SQ_99,
);

impl Square {
    /// 1 始まりの筋番号 `x`、段番号 `y` からマスを作る。盤面外なら `None` を返す。
    pub const fn new(x: i32, y: i32) -> Option<Self> {
        match (Col::from_number(x), Row::from_number(y)) {
            (Some(col), Some(row)) => Some(Self::from_col_row(col, row)),
            _ => None,
        }
    }

    /// 筋と段からマスを作る。`col`, `row` は盤面内でなければならない。
    pub const fn from_col_row(col: Col, row: Row) -> Self {
        debug_assert!(col.is_on_board() && row.is_on_board());

        Self(9 * col.0 + row.0)
    }

    /// マスが盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        SQ_11.0 <= self.0 && self.0 <= SQ_99.0
    }

    /// マスの属する筋を返す。
    pub const fn col(self) -> Col {
        debug_assert!(self.is_on_board());

        Col(self.0 / 9)
    }

    /// マスの属する段を返す。
    pub const fn row(self) -> Row {
        debug_assert!(self.is_on_board());

        Row(self.0 % 9)
    }

    /// 1 始まりの筋番号を返す。
    pub const fn x(self) -> i32 {
        self.col().number()
    }

    /// 1 始まりの段番号を返す。
    pub const fn y(self) -> i32 {
        self.row().number()
    }

    /// マスが指定した陣営にとって敵陣かどうかを返す。
    pub const fn is_promotion_zone(self, color: Color) -> bool {
        self.row().is_promotion_zone(color)
    }

    /// 全マスを昇順に列挙する。(`SQ_11`, `SQ_12`, ..., `SQ_99` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        (SQ_11.0..SQ_99.0 + 1).map(Self)
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl From<Square> for usize {
    fn from(sq: Square) -> Self {
        debug_assert!(sq.is_on_board());

        sq.0 as Self
    }
}

impl std::fmt::Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "SQ_{}{}", self.x(), self.y())
        } else {
            write!(f, "Square({})", self.0)
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", self.col(), self.row())
        } else {
            write!(f, "無効なマス({})", self.0)
        }
    }
}

/// 駒種(陣営の区別なし)。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct PieceKind(u32);

// 値が連続で、かつ成れる駒種は (1 << 3) を OR することで成駒になる。
// 金と玉は成れないので、成駒の範囲とは重ならないように置いてある。

pub const NO_PIECE_KIND: PieceKind = PieceKind(0);
pub const PAWN: PieceKind = PieceKind(1);
pub const LANCE: PieceKind = PieceKind(2);
pub const KNIGHT: PieceKind = PieceKind(3);
pub const SILVER: PieceKind = PieceKind(4);
pub const BISHOP: PieceKind = PieceKind(5);
pub const ROOK: PieceKind = PieceKind(6);
pub const GOLD: PieceKind = PieceKind(7);
pub const KING: PieceKind = PieceKind(8);
pub const PRO_PAWN: PieceKind = PieceKind(9);
pub const PRO_LANCE: PieceKind = PieceKind(10);
pub const PRO_KNIGHT: PieceKind = PieceKind(11);
pub const PRO_SILVER: PieceKind = PieceKind(12);
pub const HORSE: PieceKind = PieceKind(13);
pub const DRAGON: PieceKind = PieceKind(14);

impl PieceKind {
    /// 有効値かどうかを返す。`NO_PIECE_KIND` も有効とみなす。
    pub const fn is_valid(self) -> bool {
        NO_PIECE_KIND.0 <= self.0 && self.0 <= DRAGON.0
    }

    /// 有効値かつ実際の駒かどうかを返す。`NO_PIECE_KIND` は実際の駒ではない。
    pub const fn is_piece(self) -> bool {
        PAWN.0 <= self.0 && self.0 <= DRAGON.0
    }

    /// 成れる駒種かどうかを返す。
    pub const fn is_promotable(self) -> bool {
        PAWN.0 <= self.0 && self.0 <= ROOK.0
    }

    /// 成駒かどうかを返す。
    pub const fn is_promoted(self) -> bool {
        PRO_PAWN.0 <= self.0 && self.0 <= DRAGON.0
    }

    /// 手駒となりうる駒種かどうかを返す。
    ///
    /// このレイヤーでは玉を取る手も生成されるので、玉も手駒になりうる。
    pub const fn is_hand(self) -> bool {
        PAWN.0 <= self.0 && self.0 <= KING.0
    }

    /// 成った駒種を返す。成れない駒種ならそのまま返す。
    pub const fn to_promoted(self) -> Self {
        if self.is_promotable() {
            Self(self.0 | (1 << 3))
        } else {
            self
        }
    }

    /// 成っていない駒種を返す。成駒でなければそのまま返す。
    pub const fn to_unpromoted(self) -> Self {
        if self.is_promoted() {
            Self(self.0 & 7)
        } else {
            self
        }
    }

    /// この駒種を成らずに置くと行き所のなくなる段数を、敵陣の最奥から数えて返す。
    ///
    /// 歩と香は 1 (最奥の段)、桂は 2 (最奥の 2 段)、それ以外は 0。
    pub const fn dead_end_rows(self) -> i32 {
        match self.0 {
            1 | 2 => 1,
            3 => 2,
            _ => 0,
        }
    }

    /// 実際の駒である駒種を昇順に列挙する。
    pub fn iter_piece(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        (PAWN.0..DRAGON.0 + 1).map(Self)
    }

    /// 手駒となりうる駒種を昇順に列挙する。
    pub fn iter_hand(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        (PAWN.0..KING.0 + 1).map(Self)
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl From<PieceKind> for usize {
    fn from(pk: PieceKind) -> Self {
        debug_assert!(pk.is_valid());

        pk.0 as Self
    }
}

impl std::fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const NAMES: [&str; 15] = [
            "NO_PIECE_KIND",
            "PAWN",
            "LANCE",
            "KNIGHT",
            "SILVER",
            "BISHOP",
            "ROOK",
            "GOLD",
            "KING",
            "PRO_PAWN",
            "PRO_LANCE",
            "PRO_KNIGHT",
            "PRO_SILVER",
            "HORSE",
            "DRAGON",
        ];

        match NAMES.get(self.0 as usize) {
            Some(name) => f.write_str(name),
            None => write!(f, "PieceKind({})", self.0),
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const NAMES: [&str; 15] = [
            "・", "歩", "香", "桂", "銀", "角", "飛", "金", "玉", "と", "杏", "圭", "全", "馬", "龍",
        ];

        match NAMES.get(self.0 as usize) {
            Some(name) => f.write_str(name),
            None => write!(f, "無効な駒種({})", self.0),
        }
    }
}

/// 駒(陣営の区別あり)。
///
/// 小さな値型で、盤上のマスか手駒のどちらか一方にのみ存在する。
/// 盤と手駒の間を移るときはコピーして移動元を消す。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Piece(u32);

// 先手の駒に (1 << 4) を OR することで後手の駒になる。

pub const NO_PIECE: Piece = Piece(0);
pub const B_PAWN: Piece = Piece::new(BLACK, PAWN);
pub const B_LANCE: Piece = Piece::new(BLACK, LANCE);
pub const B_KNIGHT: Piece = Piece::new(BLACK, KNIGHT);
pub const B_SILVER: Piece = Piece::new(BLACK, SILVER);
pub const B_BISHOP: Piece = Piece::new(BLACK, BISHOP);
pub const B_ROOK: Piece = Piece::new(BLACK, ROOK);
pub const B_GOLD: Piece = Piece::new(BLACK, GOLD);
pub const B_KING: Piece = Piece::new(BLACK, KING);
pub const B_PRO_PAWN: Piece = Piece::new(BLACK, PRO_PAWN);
pub const B_PRO_LANCE: Piece = Piece::new(BLACK, PRO_LANCE);
pub const B_PRO_KNIGHT: Piece = Piece::new(BLACK, PRO_KNIGHT);
pub const B_PRO_SILVER: Piece = Piece::new(BLACK, PRO_SILVER);
pub const B_HORSE: Piece = Piece::new(BLACK, HORSE);
pub const B_DRAGON: Piece = Piece::new(BLACK, DRAGON);
pub const W_PAWN: Piece = Piece::new(WHITE, PAWN);
pub const W_LANCE: Piece = Piece::new(WHITE, LANCE);
pub const W_KNIGHT: Piece = Piece::new(WHITE, KNIGHT);
pub const W_SILVER: Piece = Piece::new(WHITE, SILVER);
pub const W_BISHOP: Piece = Piece::new(WHITE, BISHOP);
pub const W_ROOK: Piece = Piece::new(WHITE, ROOK);
pub const W_GOLD: Piece = Piece::new(WHITE, GOLD);
pub const W_KING: Piece = Piece::new(WHITE, KING);
pub const W_PRO_PAWN: Piece = Piece::new(WHITE, PRO_PAWN);
pub const W_PRO_LANCE: Piece = Piece::new(WHITE, PRO_LANCE);
pub const W_PRO_KNIGHT: Piece = Piece::new(WHITE, PRO_KNIGHT);
pub const W_PRO_SILVER: Piece = Piece::new(WHITE, PRO_SILVER);
pub const W_HORSE: Piece = Piece::new(WHITE, HORSE);
pub const W_DRAGON: Piece = Piece::new(WHITE, DRAGON);

impl Piece {
    /// 陣営と駒種を指定して駒を作る。`pk` は実際の駒でなければならない。
    pub const fn new(color: Color, pk: PieceKind) -> Self {
        debug_assert!(pk.is_piece());

        Self((color.0 << 4) | pk.0)
    }

    /// 有効値かつ実際の駒かどうかを返す。`NO_PIECE` は実際の駒ではない。
    pub const fn is_piece(self) -> bool {
        self.kind().is_piece() && (self.0 >> 5) == 0
    }

    /// 成れる駒かどうかを返す。
    pub const fn is_promotable(self) -> bool {
        self.kind().is_promotable()
    }

    /// 成駒かどうかを返す。
    pub const fn is_promoted(self) -> bool {
        self.kind().is_promoted()
    }

    /// 所属陣営を返す。`self` は実際の駒でなければならない。
    pub const fn color(self) -> Color {
        debug_assert!(self.is_piece());

        Color((self.0 >> 4) & 1)
    }

    /// 駒種を返す。
    pub const fn kind(self) -> PieceKind {
        PieceKind(self.0 & 0xF)
    }

    /// 成った駒を返す。成れない駒ならそのまま返す。
    pub const fn to_promoted(self) -> Self {
        Self((self.0 & !0xF) | self.kind().to_promoted().0)
    }

    /// 成っていない駒を返す。成駒でなければそのまま返す。
    pub const fn to_unpromoted(self) -> Self {
        Self((self.0 & !0xF) | self.kind().to_unpromoted().0)
    }

    /// 陣営を反転した駒を返す。
    pub const fn to_inverse(self) -> Self {
        debug_assert!(self.is_piece());

        Self(self.0 ^ (1 << 4))
    }

    /// その場で成る。成れない駒なら何もしない。
    pub fn promote(&mut self) {
        *self = self.to_promoted();
    }

    /// その場で成りを戻す。成駒でなければ何もしない。
    pub fn unpromote(&mut self) {
        *self = self.to_unpromoted();
    }

    /// その場で陣営を反転する。
    pub fn inverse(&mut self) {
        *self = self.to_inverse();
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if *self == NO_PIECE {
            return f.write_str("NO_PIECE");
        }
        if !self.is_piece() {
            return write!(f, "Piece({})", self.0);
        }

        let prefix = if self.color() == BLACK { "B" } else { "W" };
        write!(f, "{}_{:?}", prefix, self.kind())
    }
}

/// 指し手。
///
/// `u32` に pack されている。ビットレイアウト:
///
/// * bit0-6:   移動先
/// * bit7-13:  移動元(駒打ちなら打った駒種)
/// * bit14:    駒打ちか
/// * bit15:    成りか
///
/// 駒打ちの陣営は持たない。生成した側、あるいは打つ側の陣営が暗黙に決まる。
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Move(u32);

impl Move {
    const FLAG_DROP: u32 = 1 << 14;
    const FLAG_PROMOTION: u32 = 1 << 15;

    /// 盤上の駒を動かして成らない指し手を作る。
    pub const fn new_walk(src: Square, dst: Square) -> Self {
        debug_assert!(src.is_on_board());
        debug_assert!(dst.is_on_board());

        Self((dst.0 as u32) | ((src.0 as u32) << 7))
    }

    /// 盤上の駒を動かして成る指し手を作る。
    pub const fn new_walk_promotion(src: Square, dst: Square) -> Self {
        Self(Self::new_walk(src, dst).0 | Self::FLAG_PROMOTION)
    }

    /// 駒打ちの指し手を作る。`pk` は手駒となりうる駒種でなければならない。
    pub const fn new_drop(pk: PieceKind, dst: Square) -> Self {
        debug_assert!(pk.is_hand());
        debug_assert!(dst.is_on_board());

        Self((dst.0 as u32) | (pk.0 << 7) | Self::FLAG_DROP)
    }

    /// 駒打ちかどうかを返す。
    pub const fn is_drop(self) -> bool {
        (self.0 & Self::FLAG_DROP) != 0
    }

    /// 成りかどうかを返す。
    pub const fn is_promotion(self) -> bool {
        (self.0 & Self::FLAG_PROMOTION) != 0
    }

    /// 移動先を返す。
    pub const fn dst(self) -> Square {
        Square((self.0 & 0x7F) as i32)
    }

    /// 移動元を返す。`self` は盤上の駒を動かす指し手でなければならない。
    pub const fn src(self) -> Square {
        debug_assert!(!self.is_drop());

        Square(((self.0 >> 7) & 0x7F) as i32)
    }

    /// 打った駒種を返す。`self` は駒打ちでなければならない。
    pub const fn dropped_piece_kind(self) -> PieceKind {
        debug_assert!(self.is_drop());

        PieceKind((self.0 >> 7) & 0x7F)
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_drop() {
            f.debug_struct("Drop")
                .field("pk", &self.dropped_piece_kind())
                .field("dst", &self.dst())
                .finish()
        } else {
            f.debug_struct("Walk")
                .field("src", &self.src())
                .field("dst", &self.dst())
                .field("promo", &self.is_promotion())
                .finish()
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_drop() {
            write!(f, "{}{}打", self.dst(), self.dropped_piece_kind())
        } else {
            write!(f, "{}{}", self.src(), self.dst())?;
            if self.is_promotion() {
                f.write_str("成")?;
            }
            Ok(())
        }
    }
}

/// undo 可能な指し手。
///
/// `u32` に pack されている。ビットレイアウトは `Move` のそれを拡張したもの:
///
/// * bit0-15:  `Move` (成りフラグは実際に成ったかどうかを表す。強制成りも含む)
/// * bit16-19: 捕獲した駒種(盤上にあったときのまま。駒取りでない場合 `NO_PIECE_KIND`)
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct UndoableMove(u32);

impl UndoableMove {
    /// 盤上の駒を動かす指し手から `UndoableMove` を作る。
    pub const fn from_move_walk(mv: Move, captured: Option<PieceKind>) -> Self {
        debug_assert!(!mv.is_drop());

        let pk_captured = match captured {
            Some(pk) => pk,
            None => NO_PIECE_KIND,
        };

        Self(mv.0 | (pk_captured.0 << 16))
    }

    /// 駒打ちの指し手から `UndoableMove` を作る。
    pub const fn from_move_drop(mv: Move) -> Self {
        debug_assert!(mv.is_drop());

        // 駒打ちの場合、既に undo 用情報は揃っている。
        Self(mv.0)
    }

    /// 駒打ちかどうかを返す。
    pub const fn is_drop(self) -> bool {
        Move(self.0 & 0xFFFF).is_drop()
    }

    /// 実際に成ったかどうかを返す。
    pub const fn is_promotion(self) -> bool {
        Move(self.0 & 0xFFFF).is_promotion()
    }

    /// 移動先を返す。
    pub const fn dst(self) -> Square {
        Move(self.0 & 0xFFFF).dst()
    }

    /// 移動元を返す。`self` は盤上の駒を動かす指し手でなければならない。
    pub const fn src(self) -> Square {
        Move(self.0 & 0xFFFF).src()
    }

    /// 打った駒種を返す。`self` は駒打ちでなければならない。
    pub const fn dropped_piece_kind(self) -> PieceKind {
        Move(self.0 & 0xFFFF).dropped_piece_kind()
    }

    /// 捕獲した駒種を返す。駒取りでなければ `None`。
    pub const fn captured_kind(self) -> Option<PieceKind> {
        let pk = PieceKind((self.0 >> 16) & 0xF);
        if pk.0 == NO_PIECE_KIND.0 {
            None
        } else {
            Some(pk)
        }
    }
}

impl From<UndoableMove> for Move {
    fn from(umv: UndoableMove) -> Self {
        Self(umv.0 & 0xFFFF)
    }
}

impl std::fmt::Debug for UndoableMove {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("UndoableMove")
            .field("mv", &Move::from(*self))
            .field("captured", &self.captured_kind())
            .finish()
    }
}

impl std::fmt::Display for UndoableMove {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Move::from(*self))?;
        if let Some(pk) = self.captured_kind() {
            write!(f, " (捕獲: {})", pk)?;
        }

        Ok(())
    }
}

/// 盤面。空きマスは `NO_PIECE`。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Board([Piece; 81]);

impl Board {
    /// 空の盤面を返す。
    pub const fn empty() -> Self {
        Self([NO_PIECE; 81])
    }

    /// 平手初期盤面を返す。
    pub const fn startpos() -> Self {
        #[rustfmt::skip]
        const INNER: [Piece; 81] = [
            W_LANCE,  NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_LANCE,
            W_KNIGHT, W_BISHOP, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, B_ROOK,   B_KNIGHT,
            W_SILVER, NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_SILVER,
            W_GOLD,   NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_GOLD,
            W_KING,   NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_KING,
            W_GOLD,   NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_GOLD,
            W_SILVER, NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_SILVER,
            W_KNIGHT, W_ROOK,   W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, B_BISHOP, B_KNIGHT,
            W_LANCE,  NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_LANCE,
        ];

        Self(INNER)
    }
}

impl std::ops::Index<Square> for Board {
    type Output = Piece;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[usize::from(sq)]
    }
}

impl std::ops::IndexMut<Square> for Board {
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.0[usize::from(sq)]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in Row::iter() {
            for col in Col::iter().rev() {
                let pc = self[Square::from_col_row(col, row)];
                if pc == NO_PIECE || pc.color() == BLACK {
                    f.write_str(" ")?;
                } else {
                    f.write_str("v")?;
                }
                write!(f, "{}", pc.kind())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// 手駒。
///
/// 駒種ごとの枚数を持つ多重集合。同じ駒種の駒は区別しない。
/// 手駒に入る駒は常に成っていない駒種に戻される。
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Hand([u32; 9]);

impl Hand {
    /// 空の手駒を返す。
    pub const fn empty() -> Self {
        Self([0; 9])
    }

    /// 手駒が空かどうかを返す。
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// 指定した駒種の枚数を返す。手駒になりえない駒種なら 0。
    pub fn count(&self, pk: PieceKind) -> u32 {
        if pk.is_hand() {
            self.0[usize::from(pk)]
        } else {
            0
        }
    }

    /// 駒を 1 枚加える。成駒は成っていない駒種に戻される。
    pub fn push(&mut self, pk: PieceKind) {
        let pk = pk.to_unpromoted();
        debug_assert!(pk.is_hand());

        self.0[usize::from(pk)] += 1;
    }

    /// 指定した駒種の駒を 1 枚取り除く。持っていなければ何もせず `false` を返す。
    pub fn remove(&mut self, pk: PieceKind) -> bool {
        if self.count(pk) == 0 {
            return false;
        }

        self.0[usize::from(pk)] -= 1;

        true
    }

    /// 1 枚以上持っている駒種を昇順に列挙する。
    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        PieceKind::iter_hand().filter(move |&pk| self.count(pk) > 0)
    }
}

impl std::ops::Index<PieceKind> for Hand {
    type Output = u32;

    /// 手駒とならない駒種を渡してはならない。
    fn index(&self, pk: PieceKind) -> &Self::Output {
        debug_assert!(pk.is_hand());

        &self.0[usize::from(pk)]
    }
}

impl std::ops::IndexMut<PieceKind> for Hand {
    /// 手駒とならない駒種を渡してはならない。
    fn index_mut(&mut self, pk: PieceKind) -> &mut Self::Output {
        debug_assert!(pk.is_hand());

        &mut self.0[usize::from(pk)]
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const PKS: [PieceKind; 8] = [KING, ROOK, BISHOP, GOLD, SILVER, KNIGHT, LANCE, PAWN];

        if self.is_empty() {
            return f.write_str("なし");
        }

        for pk in PKS {
            let n = self[pk];
            if n == 0 {
                continue;
            }

            write!(f, "{}", pk)?;
            if n >= 2 {
                write!(f, "{}", n)?;
            }
        }

        Ok(())
    }
}

/// 両陣営の手駒。`Color` でインデックスアクセスできる。
pub type Hands = MyArray1<Hand, Color, 2>;

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_square_coordinates() {
        assert_eq!(Square::new(7, 6), Some(SQ_76));
        assert_eq!(Square::new(1, 1), Some(SQ_11));
        assert_eq!(Square::new(9, 9), Some(SQ_99));
        assert_eq!(Square::new(0, 5), None);
        assert_eq!(Square::new(5, 10), None);

        assert_eq!(SQ_34.col(), COL_3);
        assert_eq!(SQ_34.row(), ROW_4);
        assert_eq!((SQ_34.x(), SQ_34.y()), (3, 4));

        assert_eq!(Square::iter().count(), 81);
        assert_eq!(Square::iter().last(), Some(SQ_99));
    }

    #[test]
    fn test_row_is_promotion_zone() {
        for row in Row::iter() {
            assert_eq!(row.is_promotion_zone(BLACK), row <= ROW_3);
            assert_eq!(row.is_promotion_zone(WHITE), row >= ROW_7);
        }
    }

    #[test]
    fn test_row_rank_from_far_end() {
        assert_eq!(ROW_1.rank_from_far_end(BLACK), 1);
        assert_eq!(ROW_9.rank_from_far_end(BLACK), 9);
        assert_eq!(ROW_9.rank_from_far_end(WHITE), 1);
        assert_eq!(ROW_8.rank_from_far_end(WHITE), 2);
        assert_eq!(ROW_1.rank_from_far_end(WHITE), 9);
    }

    #[test]
    fn test_piece_kind_promotion() {
        assert_eq!(PAWN.to_promoted(), PRO_PAWN);
        assert_eq!(ROOK.to_promoted(), DRAGON);
        assert_eq!(GOLD.to_promoted(), GOLD);
        assert_eq!(KING.to_promoted(), KING);
        assert_eq!(HORSE.to_promoted(), HORSE);

        assert_eq!(HORSE.to_unpromoted(), BISHOP);
        assert_eq!(PRO_SILVER.to_unpromoted(), SILVER);
        assert_eq!(KING.to_unpromoted(), KING);
        assert_eq!(GOLD.to_unpromoted(), GOLD);

        assert_eq!(PAWN.dead_end_rows(), 1);
        assert_eq!(LANCE.dead_end_rows(), 1);
        assert_eq!(KNIGHT.dead_end_rows(), 2);
        assert_eq!(PRO_PAWN.dead_end_rows(), 0);
        assert_eq!(SILVER.dead_end_rows(), 0);
    }

    #[test]
    fn test_piece_mutation() {
        let mut pc = W_SILVER;

        pc.promote();
        assert_eq!(pc, W_PRO_SILVER);
        pc.promote();
        assert_eq!(pc, W_PRO_SILVER);

        pc.inverse();
        assert_eq!(pc, B_PRO_SILVER);

        pc.unpromote();
        assert_eq!(pc, B_SILVER);
        assert_eq!(pc.color(), BLACK);

        let mut gold = B_GOLD;
        gold.promote();
        assert_eq!(gold, B_GOLD);
    }

    #[test]
    fn test_move_packing() {
        let mv = Move::new_walk_promotion(SQ_88, SQ_22);
        assert!(!mv.is_drop());
        assert!(mv.is_promotion());
        assert_eq!((mv.src(), mv.dst()), (SQ_88, SQ_22));

        let mv = Move::new_drop(KNIGHT, SQ_55);
        assert!(mv.is_drop());
        assert_eq!(mv.dropped_piece_kind(), KNIGHT);
        assert_eq!(mv.dst(), SQ_55);

        let umv = UndoableMove::from_move_walk(Move::new_walk(SQ_76, SQ_75), Some(HORSE));
        assert_eq!(umv.captured_kind(), Some(HORSE));
        assert_eq!(Move::from(umv), Move::new_walk(SQ_76, SQ_75));
    }

    #[test]
    fn test_hand_multiset() {
        let mut hand = Hand::empty();
        assert!(hand.is_empty());

        hand.push(PRO_PAWN);
        hand.push(PAWN);
        hand.push(DRAGON);

        assert_eq!(hand.count(PAWN), 2);
        assert_eq!(hand.count(ROOK), 1);
        assert_eq!(hand.count(DRAGON), 0);
        assert_eq!(hand.kinds().collect::<Vec<_>>(), vec![PAWN, ROOK]);

        assert!(hand.remove(ROOK));
        assert!(!hand.remove(ROOK));
        assert!(!hand.remove(HORSE));
        assert_eq!(hand.to_string(), "歩2");
    }
}
