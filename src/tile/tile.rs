use std::fmt;

/// 麻将牌种类
///
/// 立直麻将使用 34 种牌，每种 4 张，共 136 张：
/// 万、筒、条各 1-9，字牌 7 种（东南西北白发中，对应 1-7）
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// 万子（1-9）
    Wan(u8),
    /// 筒子（1-9）
    Tong(u8),
    /// 条子（1-9）
    Tiao(u8),
    /// 字牌（1-7：东、南、西、北、白、发、中）
    Zi(u8),
}

/// 牌种索引的数量
pub const NUM_KINDS: usize = 34;

/// 每种牌的物理张数上限
pub const MAX_COPIES: u8 = 4;

/// 幺九牌（国士无双所需的 13 种牌）的索引
pub const TERMINAL_AND_HONOR_INDICES: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

impl Tile {
    /// 总牌数：136 张
    pub const TOTAL_COUNT: usize = 136;

    /// 数牌的数字范围：1-9
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;

    /// 字牌数字范围：1-7
    pub const MAX_HONOR_RANK: u8 = 7;

    /// 按索引顺序排列的全部 34 种牌
    pub const ALL: [Tile; NUM_KINDS] = [
        Tile::Wan(1), Tile::Wan(2), Tile::Wan(3), Tile::Wan(4), Tile::Wan(5),
        Tile::Wan(6), Tile::Wan(7), Tile::Wan(8), Tile::Wan(9),
        Tile::Tong(1), Tile::Tong(2), Tile::Tong(3), Tile::Tong(4), Tile::Tong(5),
        Tile::Tong(6), Tile::Tong(7), Tile::Tong(8), Tile::Tong(9),
        Tile::Tiao(1), Tile::Tiao(2), Tile::Tiao(3), Tile::Tiao(4), Tile::Tiao(5),
        Tile::Tiao(6), Tile::Tiao(7), Tile::Tiao(8), Tile::Tiao(9),
        Tile::Zi(1), Tile::Zi(2), Tile::Zi(3), Tile::Zi(4),
        Tile::Zi(5), Tile::Zi(6), Tile::Zi(7),
    ];

    /// 创建一张牌，验证输入有效性
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        let max_rank = match suit {
            Suit::Zi => Self::MAX_HONOR_RANK,
            _ => Self::MAX_RANK,
        };
        if rank < Self::MIN_RANK || rank > max_rank {
            return None;
        }
        Some(match suit {
            Suit::Wan => Tile::Wan(rank),
            Suit::Tong => Tile::Tong(rank),
            Suit::Tiao => Tile::Tiao(rank),
            Suit::Zi => Tile::Zi(rank),
        })
    }

    /// 获取花色
    pub fn suit(&self) -> Suit {
        match self {
            Tile::Wan(_) => Suit::Wan,
            Tile::Tong(_) => Suit::Tong,
            Tile::Tiao(_) => Suit::Tiao,
            Tile::Zi(_) => Suit::Zi,
        }
    }

    /// 获取数字（数牌 1-9，字牌 1-7）
    pub fn rank(&self) -> u8 {
        match self {
            Tile::Wan(r) | Tile::Tong(r) | Tile::Tiao(r) | Tile::Zi(r) => *r,
        }
    }

    /// 检查数字是否在该花色的合法范围内
    pub fn is_valid(&self) -> bool {
        Tile::new(self.suit(), self.rank()).is_some()
    }

    /// 是否为数牌
    pub fn is_numbered(&self) -> bool {
        self.suit().is_numbered()
    }

    /// 是否为幺九牌（1、9 数牌或字牌）
    pub fn is_terminal_or_honor(&self) -> bool {
        match self {
            Tile::Zi(_) => true,
            _ => self.rank() == 1 || self.rank() == 9,
        }
    }

    /// 转换为牌种索引（0-33）
    ///
    /// 映射规则：
    /// - 万子：0-8
    /// - 筒子：9-17
    /// - 条子：18-26
    /// - 字牌：27-33
    ///
    /// 调用前应保证 `is_valid()`
    pub fn to_index(&self) -> usize {
        self.suit().offset() + (self.rank() as usize - 1)
    }

    /// 从牌种索引创建牌
    ///
    /// 索引范围：0-33
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 检查是否为同一种牌
    pub fn same_type(&self, other: &Tile) -> bool {
        self == other
    }

    /// 检查是否可以组成顺子（连续三张，仅限数牌）
    pub fn can_form_sequence(&self, other1: &Tile, other2: &Tile) -> bool {
        if !self.is_numbered() || self.suit() != other1.suit() || self.suit() != other2.suit() {
            return false;
        }
        let mut ranks = [self.rank(), other1.rank(), other2.rank()];
        ranks.sort();
        ranks[0] + 1 == ranks[1] && ranks[1] + 1 == ranks[2]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.suit() {
            Suit::Wan => 'm',
            Suit::Tong => 'p',
            Suit::Tiao => 's',
            Suit::Zi => 'z',
        };
        write!(f, "{}{}", self.rank(), suffix)
    }
}

/// 花色枚举
///
/// 字牌不能组成顺子，在搜索中单独作为一组处理
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Wan = 0,
    Tong = 1,
    Tiao = 2,
    Zi = 3,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 4] {
        [Suit::Wan, Suit::Tong, Suit::Tiao, Suit::Zi]
    }

    /// 是否为数牌花色（可以组成顺子）
    pub fn is_numbered(&self) -> bool {
        !matches!(self, Suit::Zi)
    }

    /// 该花色第一张牌的索引
    pub fn offset(&self) -> usize {
        *self as usize * 9
    }

    /// 该花色的牌种数量
    pub fn num_kinds(&self) -> usize {
        match self {
            Suit::Zi => Tile::MAX_HONOR_RANK as usize,
            _ => Tile::MAX_RANK as usize,
        }
    }
}
