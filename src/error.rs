//! 局面操作のエラー。

use thiserror::Error;

use crate::shogi::{Color, PieceKind, Square};

/// 局面操作が失敗した理由。
///
/// エラーを返した操作は局面を一切変更していない。
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("no piece at {0:?}")]
    NoPieceAtSource(Square),

    #[error("illegal move: {src:?} -> {dst:?}")]
    IllegalMove { src: Square, dst: Square },

    #[error("illegal drop: {kind:?} to {dst:?}")]
    IllegalDrop { kind: PieceKind, dst: Square },

    #[error("destination {0:?} is occupied")]
    OccupiedDestination(Square),

    #[error("turn violation: {0:?} is not allowed to act now")]
    TurnViolation(Color),

    #[error("{color:?} has no {kind:?} in hand")]
    HandShortage { color: Color, kind: PieceKind },

    #[error("edit mode required")]
    EditModeRequired,
}

pub type Result<T> = std::result::Result<T, Error>;
