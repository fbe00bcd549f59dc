use crate::tile::{Tile, NUM_KINDS};
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// 牌种位集合
///
/// 使用 u64 的低 34 位表示 34 种牌，第 i 位对应索引为 i 的牌（见 [`Tile::to_index`]）
///
/// 用于有效牌（进张）和可切牌的集合表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct TileFlags(u64);

impl TileFlags {
    /// 全部 34 种牌的掩码
    pub const ALL_MASK: u64 = (1 << NUM_KINDS) - 1;

    /// 空集合
    pub fn new() -> Self {
        Self(0)
    }

    /// 从原始位创建（高于 34 位的部分会被丢弃）
    pub fn from_bits(bits: u64) -> Self {
        Self(bits & Self::ALL_MASK)
    }

    /// 原始位
    pub fn bits(&self) -> u64 {
        self.0
    }

    /// 加入一张牌
    pub fn insert(&mut self, tile: Tile) {
        if tile.is_valid() {
            self.insert_index(tile.to_index());
        }
    }

    /// 按索引加入（0-33）
    #[inline]
    pub(crate) fn insert_index(&mut self, index: usize) {
        debug_assert!(index < NUM_KINDS);
        self.0 |= 1 << index;
    }

    /// 移除一张牌
    pub fn remove(&mut self, tile: Tile) {
        if tile.is_valid() {
            self.0 &= !(1 << tile.to_index());
        }
    }

    /// 是否包含某张牌
    pub fn contains(&self, tile: Tile) -> bool {
        tile.is_valid() && (self.0 >> tile.to_index()) & 1 == 1
    }

    /// 牌种数量
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 按索引顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = Tile> {
        let bits = self.0;
        Tile::ALL
            .into_iter()
            .enumerate()
            .filter(move |(i, _)| (bits >> i) & 1 == 1)
            .map(|(_, tile)| tile)
    }

    /// 转换为牌列表
    pub fn to_vec(&self) -> Vec<Tile> {
        self.iter().collect()
    }
}

impl BitOr for TileFlags {
    type Output = TileFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        TileFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TileFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TileFlags {
    type Output = TileFlags;

    fn bitand(self, rhs: Self) -> Self::Output {
        TileFlags(self.0 & rhs.0)
    }
}

impl FromIterator<Tile> for TileFlags {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut flags = TileFlags::new();
        for tile in iter {
            flags.insert(tile);
        }
        flags
    }
}

/// 花色计数编码
///
/// 每种牌的数量用 3 位存储（0-7），一个花色最多 9 种牌，共 27 位
/// 用作分组表缓存的键
#[inline]
pub(crate) fn pack_counts(counts: &[u8]) -> u32 {
    debug_assert!(counts.len() <= 10);
    counts
        .iter()
        .enumerate()
        .fold(0u32, |code, (i, &count)| code | ((count as u32 & 0b111) << (i * 3)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut flags = TileFlags::new();
        assert!(flags.is_empty());

        flags.insert(Tile::Wan(1));
        flags.insert(Tile::Zi(7));
        flags.insert(Tile::Zi(7));
        assert_eq!(flags.len(), 2);
        assert!(flags.contains(Tile::Wan(1)));
        assert!(flags.contains(Tile::Zi(7)));
        assert!(!flags.contains(Tile::Wan(2)));
        assert_eq!(flags.bits(), 1 | (1 << 33));

        flags.remove(Tile::Wan(1));
        assert!(!flags.contains(Tile::Wan(1)));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn test_invalid_tiles_are_ignored() {
        let mut flags = TileFlags::new();
        flags.insert(Tile::Zi(8));
        assert!(flags.is_empty());
        assert!(!flags.contains(Tile::Zi(8)));
    }

    #[test]
    fn test_iter_in_index_order() {
        let flags: TileFlags = [Tile::Tiao(3), Tile::Wan(9), Tile::Zi(1)].into_iter().collect();
        assert_eq!(flags.to_vec(), vec![Tile::Wan(9), Tile::Tiao(3), Tile::Zi(1)]);
    }

    #[test]
    fn test_set_operations() {
        let a: TileFlags = [Tile::Wan(1), Tile::Wan(2)].into_iter().collect();
        let b: TileFlags = [Tile::Wan(2), Tile::Wan(3)].into_iter().collect();
        assert_eq!((a | b).len(), 3);
        assert_eq!((a & b).to_vec(), vec![Tile::Wan(2)]);

        let mut c = a;
        c |= b;
        assert_eq!(c, a | b);
        assert_eq!(TileFlags::from_bits(u64::MAX).len(), NUM_KINDS);
    }

    #[test]
    fn test_pack_counts() {
        assert_eq!(pack_counts(&[0; 9]), 0);
        assert_eq!(pack_counts(&[1, 2]), 1 | (2 << 3));
        assert_ne!(pack_counts(&[4, 0, 0]), pack_counts(&[0, 4, 0]));
    }
}
