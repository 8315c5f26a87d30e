mod csa;
pub mod error;
mod movedef;
mod movegen;
pub mod myarray;
mod perft;
mod position;
mod preset;
mod sfen;
mod shogi;

pub use self::csa::*;
pub use self::error::Error;
pub use self::movedef::*;
pub use self::movegen::*;
pub use self::perft::*;
pub use self::position::*;
pub use self::preset::*;
pub use self::sfen::*;
pub use self::shogi::*;
