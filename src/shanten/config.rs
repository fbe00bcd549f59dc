use crate::tile::{Tile, MAX_COPIES, NUM_KINDS};

/// 人数规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum PlayerCount {
    /// 四人麻将（标准规则）
    #[default]
    Four,
    /// 三人麻将：不使用 2-8 万
    Three,
}

impl PlayerCount {
    /// 该规则下是否存在这张牌
    pub fn uses_tile(&self, tile: Tile) -> bool {
        match (self, tile) {
            (PlayerCount::Three, Tile::Wan(rank)) => rank == 1 || rank == 9,
            _ => tile.is_valid(),
        }
    }

    /// 每种牌的物理张数上限（不存在的牌为 0）
    pub(crate) fn max_copies(&self) -> [u8; NUM_KINDS] {
        std::array::from_fn(|i| {
            if self.uses_tile(Tile::ALL[i]) {
                MAX_COPIES
            } else {
                0
            }
        })
    }
}

/// 计算配置
///
/// ```
/// use shanten_engine::{PlayerCount, ShantenConfig};
///
/// let config = ShantenConfig::new()
///     .with_player_count(PlayerCount::Three)
///     .with_advance_tiles(true);
/// assert!(config.advance_tiles);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShantenConfig {
    /// 人数规则
    pub player_count: PlayerCount,
    /// 是否在 [`HandShapeResult`](super::HandShapeResult) 中附带有效牌集合
    ///
    /// 有效牌需要对每种牌重新搜索一次，默认关闭
    pub advance_tiles: bool,
}

impl ShantenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player_count(mut self, player_count: PlayerCount) -> Self {
        self.player_count = player_count;
        self
    }

    pub fn with_advance_tiles(mut self, enabled: bool) -> Self {
        self.advance_tiles = enabled;
        self
    }
}

impl Default for ShantenConfig {
    fn default() -> Self {
        Self {
            player_count: PlayerCount::Four,
            advance_tiles: false,
        }
    }
}
