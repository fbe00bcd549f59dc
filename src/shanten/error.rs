use crate::tile::Tile;

/// 向听数计算的 Result 类型
pub type Result<T, E = ShantenError> = std::result::Result<T, E>;

/// 输入校验错误
///
/// 两种错误都表示调用方传入了非法手牌，修正输入后重新调用即可
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShantenError {
    /// 手牌总张数不在该计算方式接受的范围内
    #[error("hand size must be between {min} and {max} but was {total}")]
    InvalidHandSize { total: usize, min: usize, max: usize },

    /// 某种牌的张数超过物理上限（含副露占用的张数）
    #[error("{tile} count must be {max} or less but was {count}")]
    InvalidTileCount { tile: Tile, count: u8, max: u8 },
}
