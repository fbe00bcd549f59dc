/// 向听数计算模块
///
/// 向听数 = 目标牌型张数 - 手牌中最多能保留的张数 - 1。
/// 三种和牌形各自给出"最多能保留多少张"，计算器负责校验输入、
/// 选择适用的和牌形并合并结果

pub mod calculator;
pub mod config;
pub mod error;
pub mod lookup;
pub mod result;
pub mod seven_pairs;
pub mod standard;
pub mod thirteen_orphans;

// 重新导出常用类型
pub use calculator::{ShantenCalculator, MAX_HAND_SIZE};
pub use config::{PlayerCount, ShantenConfig};
pub use error::{Result, ShantenError};
pub use result::{HandShape, HandShapeResult};
pub use standard::{Block, Decomposition};

use crate::tile::{TileCounts, NUM_KINDS};
use crate::utils::TileFlags;

/// 和牌形搜索
///
/// `counts` 为暗手，`caps` 为每种牌在目标中最多能用的张数
pub(crate) trait ShapeSearch {
    /// 目标牌型的张数
    fn target_size(&self) -> u8;

    /// 手牌中最多能保留在某个目标牌型里的张数
    fn max_kept(&self, counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> u8;

    /// 保留 `kept` 张时的向听数
    fn shanten_for(&self, kept: u8) -> i8 {
        self.target_size() as i8 - kept as i8 - 1
    }

    /// 有效牌：还有剩余且摸到后保留张数增加的牌种
    ///
    /// `kept` 为当前手牌的 [`max_kept`](ShapeSearch::max_kept)
    fn advance_tiles(&self, kept: u8, counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> TileFlags {
        let mut probe = *counts;
        let mut flags = TileFlags::new();
        for i in 0..NUM_KINDS {
            if probe[i] >= caps[i] {
                continue;
            }
            probe[i] += 1;
            if self.max_kept(&probe, caps) > kept {
                flags.insert_index(i);
            }
            probe[i] -= 1;
        }
        flags
    }

    /// 可切牌：去掉一张后保留张数不变的手牌牌种
    fn discard_tiles(&self, kept: u8, counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> TileFlags {
        let mut probe = *counts;
        let mut flags = TileFlags::new();
        for i in 0..NUM_KINDS {
            if probe[i] == 0 {
                continue;
            }
            probe[i] -= 1;
            if self.max_kept(&probe, caps) == kept {
                flags.insert_index(i);
            }
            probe[i] += 1;
        }
        flags
    }
}

/// 一般型向听数（默认配置）
pub fn standard_shanten(hand: &TileCounts) -> Result<HandShapeResult> {
    ShantenCalculator::new().standard_shanten(hand)
}

/// 七对子向听数（默认配置）
pub fn seven_pairs_shanten(hand: &TileCounts) -> Result<HandShapeResult> {
    ShantenCalculator::new().seven_pairs_shanten(hand)
}

/// 国士无双向听数（默认配置）
pub fn thirteen_orphans_shanten(hand: &TileCounts) -> Result<HandShapeResult> {
    ShantenCalculator::new().thirteen_orphans_shanten(hand)
}

/// 所有适用和牌形中的最小向听数（默认配置）
pub fn best_shanten(hand: &TileCounts) -> Result<HandShapeResult> {
    ShantenCalculator::new().best_shanten(hand)
}
