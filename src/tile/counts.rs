use super::tile::{Suit, Tile, MAX_COPIES, NUM_KINDS};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// 手牌字符串解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTilesError {
    /// 数字后面缺少花色字母
    #[error("digits without a suit at the end of {0:?}")]
    MissingSuit(String),

    /// 该花色不存在这个点数
    #[error("invalid rank {rank} for suit '{suit}'")]
    InvalidRank { rank: char, suit: char },

    /// 无法识别的字符
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
}

/// 手牌计数（TileCounts）
///
/// 使用定长数组存储 34 种牌各自的张数，下标即牌种索引（见 [`Tile::to_index`]）
///
/// 本类型只是数据容器，不保证合法性：
/// 张数上限与总张数由 [`ShantenCalculator`](crate::ShantenCalculator) 在计算前统一校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct TileCounts {
    counts: [u8; NUM_KINDS],
}

impl TileCounts {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_KINDS],
        }
    }

    /// 从 34 种牌的张数数组创建
    ///
    /// 不做校验，可以表示非法手牌（例如同一种牌 5 张）
    pub fn from_counts(counts: [u8; NUM_KINDS]) -> Self {
        Self { counts }
    }

    /// 从牌列表创建
    ///
    /// 超过 4 张或无效的牌会被忽略
    pub fn from_tiles<I: IntoIterator<Item = Tile>>(tiles: I) -> Self {
        let mut result = Self::new();
        for tile in tiles {
            result.add_tile(tile);
        }
        result
    }

    /// 添加一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功添加
    /// - `false`：该牌已有 4 张或牌无效
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        if !tile.is_valid() {
            return false;
        }
        let count = &mut self.counts[tile.to_index()];
        if *count >= MAX_COPIES {
            return false;
        }
        *count += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        if !tile.is_valid() {
            return false;
        }
        let count = &mut self.counts[tile.to_index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// 检查是否有某张牌
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某张牌的数量
    pub fn tile_count(&self, tile: Tile) -> u8 {
        if !tile.is_valid() {
            return 0;
        }
        self.counts[tile.to_index()]
    }

    /// 按索引查询数量（0-33）
    pub fn count_at(&self, index: usize) -> u8 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// 检查手牌是否为空
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// 清空手牌
    pub fn clear(&mut self) {
        self.counts = [0; NUM_KINDS];
    }

    /// 底层数组
    pub fn as_array(&self) -> &[u8; NUM_KINDS] {
        &self.counts
    }

    /// 转换为排序后的牌向量（按索引顺序：万、筒、条、字）
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total_count());
        for (tile, &count) in Tile::ALL.iter().zip(self.counts.iter()) {
            for _ in 0..count {
                result.push(*tile);
            }
        }
        result
    }

    /// 获取所有不同的牌种（不包含数量为 0 的）
    ///
    /// 手牌通常只有 5-13 种不同的牌，使用 SmallVec 栈分配
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 14]> {
        self.iter().map(|(tile, _)| tile).collect()
    }

    /// 遍历所有数量大于 0 的 (牌, 数量)
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        Tile::ALL
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, &count)| count > 0)
            .map(|(tile, &count)| (*tile, count))
    }
}

/// 按 `123m456p789s1234z` 的写法解析手牌
///
/// 数字在前、花色字母（m 万、p 筒、s 条、z 字）在后，空白会被忽略。
/// 不检查张数上限，非法手牌交给计算器校验
impl FromStr for TileCounts {
    type Err = ParseTilesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut counts = [0u8; NUM_KINDS];
        let mut pending: SmallVec<[char; 14]> = SmallVec::new();

        for c in s.chars() {
            match c {
                '0'..='9' => pending.push(c),
                'm' | 'p' | 's' | 'z' => {
                    let suit = match c {
                        'm' => Suit::Wan,
                        'p' => Suit::Tong,
                        's' => Suit::Tiao,
                        _ => Suit::Zi,
                    };
                    for &digit in &pending {
                        let rank = digit as u8 - b'0';
                        if rank == 0 || rank as usize > suit.num_kinds() {
                            return Err(ParseTilesError::InvalidRank { rank: digit, suit: c });
                        }
                        let index = suit.offset() + rank as usize - 1;
                        counts[index] = counts[index].saturating_add(1);
                    }
                    pending.clear();
                }
                c if c.is_whitespace() => {}
                c => return Err(ParseTilesError::UnexpectedChar(c)),
            }
        }

        if !pending.is_empty() {
            return Err(ParseTilesError::MissingSuit(s.to_string()));
        }
        Ok(Self { counts })
    }
}

/// 以 `123m456p789s1234z` 的写法输出
impl fmt::Display for TileCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (suit, letter) in Suit::all().into_iter().zip(['m', 'p', 's', 'z']) {
            let range = suit.offset()..suit.offset() + suit.num_kinds();
            let mut any = false;
            for (rank, &count) in self.counts[range].iter().enumerate() {
                for _ in 0..count {
                    write!(f, "{}", rank + 1)?;
                    any = true;
                }
            }
            if any {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl Default for TileCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u8; NUM_KINDS]> for TileCounts {
    fn from(counts: [u8; NUM_KINDS]) -> Self {
        Self::from_counts(counts)
    }
}

impl From<TileCounts> for Vec<u8> {
    fn from(value: TileCounts) -> Self {
        value.counts.to_vec()
    }
}

impl TryFrom<Vec<u8>> for TileCounts {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let counts = <[u8; NUM_KINDS]>::try_from(value.as_slice())?;
        Ok(Self { counts })
    }
}

impl FromIterator<Tile> for TileCounts {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self::from_tiles(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_creation() {
        let counts = TileCounts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.total_count(), 0);
    }

    #[test]
    fn test_counts_add_multiple() {
        let mut counts = TileCounts::new();
        let tile = Tile::Wan(5);

        // 添加 4 张相同的牌
        for _ in 0..4 {
            assert!(counts.add_tile(tile));
        }
        assert_eq!(counts.total_count(), 4);
        assert_eq!(counts.tile_count(tile), 4);

        // 第 5 张应该失败
        assert!(!counts.add_tile(tile));
        assert_eq!(counts.total_count(), 4);
    }

    #[test]
    fn test_counts_invalid_tile() {
        let mut counts = TileCounts::new();
        assert!(!counts.add_tile(Tile::Zi(8)));
        assert!(!counts.add_tile(Tile::Wan(0)));
        assert_eq!(counts.tile_count(Tile::Tong(10)), 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_counts_remove_tile() {
        let mut counts = TileCounts::new();
        let tile = Tile::Tong(3);

        // 移除不存在的牌
        assert!(!counts.remove_tile(tile));

        counts.add_tile(tile);
        assert!(counts.remove_tile(tile));
        assert_eq!(counts.total_count(), 0);
        assert!(!counts.has_tile(tile));
    }

    #[test]
    fn test_counts_to_sorted_vec() {
        let counts: TileCounts = [Tile::Zi(3), Tile::Tong(5), Tile::Wan(3), Tile::Tiao(1), Tile::Tong(5)]
            .into_iter()
            .collect();

        let sorted = counts.to_sorted_vec();
        assert_eq!(
            sorted,
            vec![Tile::Wan(3), Tile::Tong(5), Tile::Tong(5), Tile::Tiao(1), Tile::Zi(3)]
        );
    }

    #[test]
    fn test_counts_from_counts_keeps_illegal_values() {
        let mut raw = [0u8; NUM_KINDS];
        raw[0] = 5;
        let counts = TileCounts::from_counts(raw);
        assert_eq!(counts.tile_count(Tile::Wan(1)), 5);
        assert_eq!(counts.total_count(), 5);
    }

    #[test]
    fn test_counts_distinct_tiles() {
        let counts = TileCounts::from_tiles([Tile::Wan(1), Tile::Wan(1), Tile::Tong(2), Tile::Zi(7)]);
        let distinct = counts.distinct_tiles();
        assert_eq!(distinct.len(), 3);
        assert!(distinct.contains(&Tile::Wan(1)));
        assert!(distinct.contains(&Tile::Tong(2)));
        assert!(distinct.contains(&Tile::Zi(7)));
    }

    #[test]
    fn test_parse_hand_notation() {
        let counts: TileCounts = "123m 456p 789s 11z".parse().unwrap();
        assert_eq!(counts.total_count(), 11);
        assert_eq!(counts.tile_count(Tile::Wan(1)), 1);
        assert_eq!(counts.tile_count(Tile::Tiao(9)), 1);
        assert_eq!(counts.tile_count(Tile::Zi(1)), 2);
        assert_eq!(counts.to_string(), "123m456p789s11z");

        assert!("".parse::<TileCounts>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "8z".parse::<TileCounts>(),
            Err(ParseTilesError::InvalidRank { rank: '8', suit: 'z' })
        );
        assert_eq!(
            "0m".parse::<TileCounts>(),
            Err(ParseTilesError::InvalidRank { rank: '0', suit: 'm' })
        );
        assert_eq!(
            "123".parse::<TileCounts>(),
            Err(ParseTilesError::MissingSuit("123".to_string()))
        );
        assert_eq!("12x".parse::<TileCounts>(), Err(ParseTilesError::UnexpectedChar('x')));
    }

    #[test]
    fn test_parse_keeps_fifth_copy() {
        let counts: TileCounts = "11111m".parse().unwrap();
        assert_eq!(counts.tile_count(Tile::Wan(1)), 5);
    }

    #[test]
    fn test_counts_serde() {
        let counts = TileCounts::from_tiles([Tile::Wan(1), Tile::Zi(7)]);
        let json = serde_json::to_string(&counts).unwrap();
        let restored: TileCounts = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, counts);

        // 长度不是 34 的数组应该被拒绝
        assert!(serde_json::from_str::<TileCounts>("[1, 2, 3]").is_err());
    }
}
