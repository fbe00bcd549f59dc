use crate::utils::TileFlags;
use smallvec::SmallVec;

/// 和牌形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum HandShape {
    /// 一般型（面子 + 雀头）
    Standard,
    /// 七对子
    SevenPairs,
    /// 国士无双
    ThirteenOrphans,
}

impl HandShape {
    /// 所有和牌形
    pub const ALL: [HandShape; 3] = [HandShape::Standard, HandShape::SevenPairs, HandShape::ThirteenOrphans];

    /// 是否只适用于门前清的 13/14 张手牌
    pub fn requires_closed_hand(&self) -> bool {
        !matches!(self, HandShape::Standard)
    }
}

/// 向听数计算结果
///
/// 向听数：-1 表示已和牌，0 表示听牌，`k` 表示还需要 `k + 1` 次有效进张才能和牌
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HandShapeResult {
    /// 向听数
    pub shanten: i8,
    /// 达到该向听数的和牌形（并列时全部列出，按 [`HandShape`] 顺序）
    pub shapes: SmallVec<[HandShape; 3]>,
    /// 有效牌集合（仅在配置开启时计算）
    pub advance_tiles: Option<TileFlags>,
}

impl HandShapeResult {
    /// 是否已和牌
    pub fn is_complete(&self) -> bool {
        self.shanten < 0
    }

    /// 是否听牌
    pub fn is_tenpai(&self) -> bool {
        self.shanten == 0
    }

    /// 替换数（向听数 + 1）：至少还要换掉的牌数
    pub fn replacement_number(&self) -> u8 {
        (self.shanten + 1).max(0) as u8
    }

    /// 某个和牌形是否达到了该向听数
    pub fn achieved_by(&self, shape: HandShape) -> bool {
        self.shapes.contains(&shape)
    }
}
