//! 手合割ごとの初期局面。

use anyhow::anyhow;
use once_cell::sync::Lazy;

use crate::sfen::sfen_decode_position;
use crate::shogi::*;

/// 手合割。
///
/// 平手以外は上手(後手)が駒を落とし、上手から指す。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Preset {
    /// 平手。
    Hirate,
    /// 香落ち。
    Kyo,
    /// 右香落ち。
    KyoRight,
    /// 角落ち。
    Kaku,
    /// 飛車落ち。
    Hisha,
    /// 飛香落ち。
    HishaKyo,
    /// 二枚落ち。
    Nimai,
    /// 三枚落ち。
    Sanmai,
    /// 四枚落ち。
    Yonmai,
    /// 五枚落ち。
    Gomai,
    /// 左五枚落ち。
    GomaiLeft,
    /// 六枚落ち。
    Rokumai,
    /// 八枚落ち。
    Hachimai,
    /// 十枚落ち。
    Jumai,
}

impl Preset {
    /// 全ての手合割。
    pub const ALL: [Self; 14] = [
        Self::Hirate,
        Self::Kyo,
        Self::KyoRight,
        Self::Kaku,
        Self::Hisha,
        Self::HishaKyo,
        Self::Nimai,
        Self::Sanmai,
        Self::Yonmai,
        Self::Gomai,
        Self::GomaiLeft,
        Self::Rokumai,
        Self::Hachimai,
        Self::Jumai,
    ];

    /// 手合割の名前を返す。`FromStr` はこの名前を受け付ける。
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hirate => "HIRATE",
            Self::Kyo => "KY",
            Self::KyoRight => "KY_R",
            Self::Kaku => "KA",
            Self::Hisha => "HI",
            Self::HishaKyo => "HIKY",
            Self::Nimai => "2",
            Self::Sanmai => "3",
            Self::Yonmai => "4",
            Self::Gomai => "5",
            Self::GomaiLeft => "5_L",
            Self::Rokumai => "6",
            Self::Hachimai => "8",
            Self::Jumai => "10",
        }
    }

    /// 全ての手合割の名前を返す。コマンドライン引数の候補に使う。
    pub fn variants() -> [&'static str; 14] {
        Self::ALL.map(Self::name)
    }

    /// 初期局面の sfen 文字列を返す。
    pub const fn sfen(self) -> &'static str {
        match self {
            Self::Hirate => "sfen lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
            Self::Kyo => "sfen lnsgkgsn1/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::KyoRight => "sfen 1nsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Kaku => "sfen lnsgkgsnl/1r7/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Hisha => "sfen lnsgkgsnl/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::HishaKyo => "sfen lnsgkgsn1/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Nimai => "sfen lnsgkgsnl/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Sanmai => "sfen lnsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Yonmai => "sfen 1nsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Gomai => "sfen 2sgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::GomaiLeft => "sfen 1nsgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Rokumai => "sfen 2sgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Hachimai => "sfen 3gkg3/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Self::Jumai => "sfen 4k4/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
        }
    }

    /// 初期局面の (手番, 盤面, 両陣営の手駒) を返す。
    pub fn startpos(self) -> (Color, Board, Hands) {
        static TABLE: Lazy<Vec<(Color, Board, Hands)>> = Lazy::new(|| {
            Preset::ALL
                .iter()
                .map(|preset| {
                    sfen_decode_position(preset.sfen())
                        .unwrap_or_else(|e| panic!("broken preset {}: {}", preset.name(), e))
                })
                .collect()
        });

        TABLE[self as usize].clone()
    }
}

impl std::str::FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("unknown preset: {}", s))
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use itertools::Itertools as _;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    /// 平手と比べて、後手の盤上から消えている駒を返す。
    fn removed_pieces(preset: Preset) -> Vec<(Square, Piece)> {
        let (_, hirate, _) = Preset::Hirate.startpos();
        let (_, board, _) = preset.startpos();

        Square::iter()
            .filter(|&sq| board[sq] != hirate[sq])
            .map(|sq| {
                assert_eq!(board[sq], NO_PIECE);
                (sq, hirate[sq])
            })
            .collect()
    }

    #[test]
    fn test_hirate() {
        let (turn, board, hands) = Preset::Hirate.startpos();
        assert_eq!(turn, BLACK);
        assert_eq!(board, Board::startpos());
        assert_eq!(hands, Hands::default());
    }

    #[test]
    fn test_handicaps() {
        assert_eq!(removed_pieces(Preset::Kyo), vec![(SQ_11, W_LANCE)]);
        assert_eq!(removed_pieces(Preset::KyoRight), vec![(SQ_91, W_LANCE)]);
        assert_eq!(removed_pieces(Preset::Kaku), vec![(SQ_22, W_BISHOP)]);
        assert_eq!(removed_pieces(Preset::Hisha), vec![(SQ_82, W_ROOK)]);
        assert_eq!(
            removed_pieces(Preset::HishaKyo),
            vec![(SQ_11, W_LANCE), (SQ_82, W_ROOK)]
        );
        assert_eq!(removed_pieces(Preset::Nimai).len(), 2);
        assert_eq!(removed_pieces(Preset::Sanmai).len(), 3);
        assert_eq!(removed_pieces(Preset::Yonmai).len(), 4);
        assert_eq!(removed_pieces(Preset::Gomai).len(), 5);
        assert_eq!(removed_pieces(Preset::GomaiLeft).len(), 5);
        assert_eq!(removed_pieces(Preset::Rokumai).len(), 6);
        assert_eq!(removed_pieces(Preset::Hachimai).len(), 8);
        assert_eq!(removed_pieces(Preset::Jumai).len(), 10);

        for preset in Preset::ALL.into_iter().filter(|&p| p != Preset::Hirate) {
            let (turn, board, hands) = preset.startpos();
            assert_eq!(turn, WHITE);
            assert_eq!(board[SQ_51], W_KING);
            assert_eq!(hands, Hands::default());
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("HIRATE".parse::<Preset>().unwrap(), Preset::Hirate);
        assert_eq!("ky_r".parse::<Preset>().unwrap(), Preset::KyoRight);
        assert_eq!("10".parse::<Preset>().unwrap(), Preset::Jumai);
        assert!("7".parse::<Preset>().is_err());

        assert!(Preset::variants().iter().all_unique());
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
    }
}
