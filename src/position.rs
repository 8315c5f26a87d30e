use anyhow::Context as _;
use log::{debug, trace};

use crate::csa::csa_encode_position;
use crate::error::{Error, Result};
use crate::movegen::{self, DropArray, MoveArray};
use crate::preset::Preset;
use crate::sfen::{sfen_decode, sfen_encode_move, sfen_encode_position};
use crate::shogi::*;

/// 局面。
///
/// 盤面、両陣営の手駒、手番、編集モードフラグからなる。
/// 局面を変更する操作は、失敗した場合は何も変更せずにエラーを返す。
///
/// 編集モードでは手番と駒の動きのチェックが行われず、手番も進まない。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    board: Board,
    hands: Hands,
    turn: Color,
    edit_mode: bool,
}

impl Position {
    /// 平手初期局面を作る。
    pub fn new() -> Self {
        Self::from_preset(Preset::Hirate)
    }

    /// 手番、盤面、両陣営の手駒を指定して局面を作る。
    /// 合法性チェックは一切行わない。
    pub fn from_parts(turn: Color, board: Board, hands: Hands) -> Self {
        debug!("position initialized: turn={:?}", turn);

        Self {
            board,
            hands,
            turn,
            edit_mode: false,
        }
    }

    /// プリセットの初期局面を作る。
    pub fn from_preset(preset: Preset) -> Self {
        let (turn, board, hands) = preset.startpos();

        Self::from_parts(turn, board, hands)
    }

    /// sfen 文字列から局面を作る。
    ///
    /// "moves" 以下の指し手があれば、それらを順に適用する。
    pub fn from_sfen(s: impl AsRef<str>) -> anyhow::Result<Self> {
        let (turn, board, hands, mvs) = sfen_decode(s)?;

        let mut this = Self::from_parts(turn, board, hands);
        for mv in mvs {
            this.do_move(mv)
                .with_context(|| format!("cannot apply move: {}", sfen_encode_move(mv)))?;
        }

        Ok(this)
    }

    /// sfen 局面文字列を返す。手数は `move_count` となる。
    pub fn to_sfen(&self, move_count: u32) -> String {
        sfen_encode_position(self.turn, &self.board, &self.hands, move_count)
    }

    /// CSA 形式の局面文字列を返す。
    pub fn to_csa(&self) -> String {
        csa_encode_position(self.turn, &self.board, &self.hands)
    }

    /// 手番を返す。
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// 盤面への参照を返す。
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 両陣営の手駒への参照を返す。
    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    /// 指定した陣営の手駒への参照を返す。
    pub fn hand(&self, color: Color) -> &Hand {
        &self.hands[color]
    }

    /// 指定したマスの駒を返す。
    pub fn get(&self, sq: Square) -> Piece {
        self.board[sq]
    }

    /// 編集モードかどうかを返す。
    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// 編集モードを設定する。
    pub fn set_edit_mode(&mut self, flag: bool) {
        if self.edit_mode != flag {
            debug!("edit mode: {}", flag);
        }
        self.edit_mode = flag;
    }

    /// 指定したマスにある駒を動かす疑似合法手を返す。
    pub fn moves_from(&self, src: Square) -> MoveArray {
        movegen::moves_from(self, src)
    }

    /// 指定した陣営の手駒を打つ疑似合法手を返す。
    pub fn drops_by(&self, color: Color) -> DropArray {
        movegen::drops_by(self, color)
    }

    /// `dst` へ動ける、指定した陣営と駒種の駒の指し手を返す。
    pub fn moves_to(&self, dst: Square, pk: PieceKind, color: Color) -> MoveArray {
        movegen::moves_to(self, dst, pk, color)
    }

    /// 盤上の駒を `src` から `dst` へ動かす。
    ///
    /// `dst` に駒があればそれを取って手駒に加える。
    /// 行き所のなくなる移動なら `promote` に関わらず成る。
    /// 取った駒の駒種(盤上にあったときのまま)を返す。
    /// `src == dst` の移動は編集モードでも `IllegalMove` となる。
    pub fn make_move(
        &mut self,
        src: Square,
        dst: Square,
        promote: bool,
    ) -> Result<Option<PieceKind>> {
        let mut pc = self.board[src];
        if pc == NO_PIECE {
            return Err(Error::NoPieceAtSource(src));
        }

        let us = pc.color();
        self.check_turn(us)?;

        if src == dst {
            return Err(Error::IllegalMove { src, dst });
        }

        if !self.edit_mode && !self.moves_from(src).contains(&Move::new_walk(src, dst)) {
            return Err(Error::IllegalMove { src, dst });
        }

        let captured = self.board[dst];
        let pk_captured = (captured != NO_PIECE).then(|| captured.kind());
        if let Some(pk) = pk_captured {
            self.hands[us].push(pk);
        }

        if dst.row().rank_from_far_end(us) <= pc.kind().dead_end_rows() || promote {
            pc.promote();
        }

        self.board[dst] = pc;
        self.board[src] = NO_PIECE;
        self.next_turn();

        trace!(
            "move: {:?} {:?} -> {:?} promote={} captured={:?}",
            pc,
            src,
            dst,
            promote,
            pk_captured
        );

        Ok(pk_captured)
    }

    /// `make_move()` を取り消す。
    ///
    /// 引数は直前の `make_move()` のそれ、および戻り値と一致していると仮定し、局面との整合性は検査しない。
    /// `promote` は実際に成った場合のみ `true` を渡すこと。
    pub fn unmove(
        &mut self,
        src: Square,
        dst: Square,
        promote: bool,
        captured: Option<PieceKind>,
    ) -> Result<()> {
        let mut pc = self.board[dst];
        if pc == NO_PIECE {
            return Err(Error::NoPieceAtSource(dst));
        }

        let us = pc.color();
        self.check_last_mover(us)?;

        if let Some(pk) = captured {
            let pk_hand = pk.to_unpromoted();
            if self.hands[us].count(pk_hand) == 0 {
                return Err(Error::HandShortage {
                    color: us,
                    kind: pk_hand,
                });
            }
        }

        let pc_restored = match captured {
            Some(pk) => {
                self.hands[us].remove(pk.to_unpromoted());
                Piece::new(us.inv(), pk)
            }
            None => NO_PIECE,
        };

        if promote {
            pc.unpromote();
        }

        self.board[src] = pc;
        self.board[dst] = pc_restored;
        self.prev_turn();

        trace!(
            "unmove: {:?} {:?} <- {:?} promote={} captured={:?}",
            pc,
            src,
            dst,
            promote,
            captured
        );

        Ok(())
    }

    /// 手駒を `dst` に打つ。`color` を省略すると手番の側の手駒を打つ。
    pub fn drop(&mut self, dst: Square, pk: PieceKind, color: Option<Color>) -> Result<()> {
        let us = color.unwrap_or(self.turn);
        self.check_turn(us)?;

        if self.board[dst] != NO_PIECE {
            return Err(Error::OccupiedDestination(dst));
        }

        if !self.edit_mode
            && !self
                .drops_by(us)
                .iter()
                .any(|mv| mv.dst() == dst && mv.dropped_piece_kind() == pk)
        {
            return Err(Error::IllegalDrop { kind: pk, dst });
        }

        if !self.hands[us].remove(pk) {
            return Err(Error::HandShortage { color: us, kind: pk });
        }

        self.board[dst] = Piece::new(us, pk);
        self.next_turn();

        trace!("drop: {:?} {:?} -> {:?}", us, pk, dst);

        Ok(())
    }

    /// `drop()` を取り消す。`dst` の駒は(成っていれば成りを戻して)持ち主の手駒に戻る。
    pub fn undrop(&mut self, dst: Square) -> Result<()> {
        let pc = self.board[dst];
        if pc == NO_PIECE {
            return Err(Error::NoPieceAtSource(dst));
        }

        let us = pc.color();
        self.check_last_mover(us)?;

        self.hands[us].push(pc.kind());
        self.board[dst] = NO_PIECE;
        self.prev_turn();

        trace!("undrop: {:?} {:?} <- {:?}", us, pc.kind(), dst);

        Ok(())
    }

    /// 指し手で局面を進め、`UndoableMove` を返す。
    ///
    /// 駒打ちは手番の側の手駒から打つ。
    /// 返り値の成りフラグは、強制成りを含め実際に成ったかどうかを表す。
    pub fn do_move(&mut self, mv: Move) -> Result<UndoableMove> {
        if mv.is_drop() {
            self.drop(mv.dst(), mv.dropped_piece_kind(), None)?;
            return Ok(UndoableMove::from_move_drop(mv));
        }

        let (src, dst) = (mv.src(), mv.dst());
        let pk_before = self.board[src].kind();

        let captured = self.make_move(src, dst, mv.is_promotion())?;

        let mv_done = if self.board[dst].kind() != pk_before {
            Move::new_walk_promotion(src, dst)
        } else {
            Move::new_walk(src, dst)
        };

        Ok(UndoableMove::from_move_walk(mv_done, captured))
    }

    /// `do_move()` を取り消す。
    pub fn undo_move(&mut self, umv: UndoableMove) -> Result<()> {
        if umv.is_drop() {
            self.undrop(umv.dst())
        } else {
            self.unmove(
                umv.src(),
                umv.dst(),
                umv.is_promotion(),
                umv.captured_kind(),
            )
        }
    }

    /// 盤上の駒を取り除き、成りを戻して `color` の手駒に加える。編集モードでのみ使える。
    pub fn capture_by_color(&mut self, sq: Square, color: Color) -> Result<()> {
        self.check_edit_mode()?;

        let pc = self.board[sq];
        if pc == NO_PIECE {
            return Err(Error::NoPieceAtSource(sq));
        }

        self.hands[color].push(pc.kind());
        self.board[sq] = NO_PIECE;

        trace!("capture_by_color: {:?} at {:?} -> {:?}", pc, sq, color);

        Ok(())
    }

    /// 盤上の駒を裏返す。編集モードでのみ使える。
    ///
    /// 成駒なら成りを戻して陣営を反転、成れる駒なら成る、それ以外なら陣営を反転する。
    /// 空きマスなら何もせず `false` を返す。
    pub fn flip(&mut self, sq: Square) -> Result<bool> {
        self.check_edit_mode()?;

        let pc = &mut self.board[sq];
        if *pc == NO_PIECE {
            return Ok(false);
        }

        if pc.is_promoted() {
            pc.unpromote();
            pc.inverse();
        } else if pc.is_promotable() {
            pc.promote();
        } else {
            pc.inverse();
        }

        trace!("flip: {:?} -> {:?}", sq, *pc);

        Ok(true)
    }

    /// 手番を設定する。編集モードでのみ使える。
    pub fn set_turn(&mut self, color: Color) -> Result<()> {
        self.check_edit_mode()?;

        debug!("set turn: {:?}", color);
        self.turn = color;

        Ok(())
    }

    /// 指定した陣営に王手がかかっているかどうかを返す。玉がなければ `false`。
    pub fn is_check(&self, color: Color) -> bool {
        let king = Piece::new(color, KING);
        let king_sq = match Square::iter().find(|&sq| self.board[sq] == king) {
            Some(sq) => sq,
            None => return false,
        };

        let them = color.inv();
        Square::iter()
            .filter(|&sq| {
                let pc = self.board[sq];
                pc != NO_PIECE && pc.color() == them
            })
            .any(|src| {
                self.moves_from(src)
                    .contains(&Move::new_walk(src, king_sq))
            })
    }

    /// 編集モードでなければ、`color` が手番の側であることを確認する。
    fn check_turn(&self, color: Color) -> Result<()> {
        if !self.edit_mode && color != self.turn {
            return Err(Error::TurnViolation(color));
        }

        Ok(())
    }

    /// 編集モードでなければ、`color` が直前に指した側(手番でない側)であることを確認する。
    fn check_last_mover(&self, color: Color) -> Result<()> {
        if !self.edit_mode && color == self.turn {
            return Err(Error::TurnViolation(color));
        }

        Ok(())
    }

    fn check_edit_mode(&self) -> Result<()> {
        if !self.edit_mode {
            return Err(Error::EditModeRequired);
        }

        Ok(())
    }

    fn next_turn(&mut self) {
        if !self.edit_mode {
            self.turn = self.turn.inv();
        }
    }

    fn prev_turn(&mut self) {
        self.next_turn();
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "後手の持駒: {}", self.hands[WHITE])?;
        write!(f, "{}", self.board)?;
        writeln!(f, "先手の持駒: {}", self.hands[BLACK])?;
        writeln!(f, "手番: {}", self.turn)?;
        if self.edit_mode {
            writeln!(f, "(編集モード)")?;
        }

        Ok(())
    }
}
