/// 麻将向听数（替换数）计算引擎
///
/// 精确计算一般型、七对子、国士无双的向听数，
/// 支持不满 13 张的手牌、副露和三人麻将

pub mod tile;
pub mod utils;
pub mod shanten;

// 重新导出常用类型
pub use tile::{Tile, Suit, TileCounts, ParseTilesError, MeldCandidate, CalledMeld, CalledMeldKind, Wall};
pub use utils::TileFlags;
pub use shanten::{
    best_shanten, seven_pairs_shanten, standard_shanten, thirteen_orphans_shanten, Block, Decomposition,
    HandShape, HandShapeResult, PlayerCount, ShantenCalculator, ShantenConfig, ShantenError,
};

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::tile::{TileCounts, NUM_KINDS};

    /// 按 `123m456p` 写法构造手牌
    pub fn hand(code: &str) -> TileCounts {
        code.parse().unwrap()
    }

    pub fn counts_from_code(code: &str) -> [u8; NUM_KINDS] {
        *hand(code).as_array()
    }
}
