use super::tile::{Tile, NUM_KINDS};
use smallvec::{smallvec, SmallVec};

/// 搭子 / 面子候选
///
/// 搜索过程中从手牌里识别出的组合，只是计算视图，生成后不再修改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeldCandidate {
    /// 刻子（三张相同牌）
    Triplet { tile: Tile },
    /// 顺子（连续三张数牌，`start` 为最小的一张）
    Sequence { start: Tile },
    /// 对子
    Pair { tile: Tile },
    /// 不完整面子：刻子或顺子中的两张
    Partial { first: Tile, second: Tile },
}

impl MeldCandidate {
    /// 组成该组合的牌
    pub fn tiles(&self) -> SmallVec<[Tile; 3]> {
        match *self {
            MeldCandidate::Triplet { tile } => smallvec![tile, tile, tile],
            MeldCandidate::Sequence { start } => {
                let index = start.to_index();
                (index..index + 3).filter_map(Tile::from_index).collect()
            }
            MeldCandidate::Pair { tile } => smallvec![tile, tile],
            MeldCandidate::Partial { first, second } => smallvec![first, second],
        }
    }

    /// 是否为完整面子（刻子或顺子）
    pub fn is_complete_meld(&self) -> bool {
        matches!(self, MeldCandidate::Triplet { .. } | MeldCandidate::Sequence { .. })
    }
}

/// 副露类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CalledMeldKind {
    /// 吃
    Chow,
    /// 碰
    Pong,
    /// 杠（明杠、暗杠、加杠在向听数计算中没有区别）
    Kong,
}

/// 副露面子
///
/// 副露的牌不在 [`TileCounts`](super::TileCounts) 中，但会占用物理张数：
/// 同一种牌的手牌张数加副露张数不能超过 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CalledMeld {
    kind: CalledMeldKind,
    /// 吃为顺子中最小的一张，碰/杠为该牌
    tile: Tile,
}

impl CalledMeld {
    /// 吃：以 `start` 开头的顺子
    ///
    /// 字牌或 8、9 开头返回 `None`
    pub fn chow(start: Tile) -> Option<Self> {
        if !start.is_valid() || !start.is_numbered() || start.rank() > 7 {
            return None;
        }
        Some(Self {
            kind: CalledMeldKind::Chow,
            tile: start,
        })
    }

    /// 碰
    pub fn pong(tile: Tile) -> Option<Self> {
        tile.is_valid().then_some(Self {
            kind: CalledMeldKind::Pong,
            tile,
        })
    }

    /// 杠
    pub fn kong(tile: Tile) -> Option<Self> {
        tile.is_valid().then_some(Self {
            kind: CalledMeldKind::Kong,
            tile,
        })
    }

    pub fn kind(&self) -> CalledMeldKind {
        self.kind
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// 副露占用的牌
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        let tile = self.tile;
        match self.kind {
            CalledMeldKind::Chow => {
                let index = tile.to_index();
                (index..index + 3).filter_map(Tile::from_index).collect()
            }
            CalledMeldKind::Pong => smallvec![tile, tile, tile],
            CalledMeldKind::Kong => smallvec![tile, tile, tile, tile],
        }
    }

    /// 把副露占用的张数累加到 `counts`
    pub(crate) fn accumulate(&self, counts: &mut [u8; NUM_KINDS]) {
        for tile in self.tiles() {
            let count = &mut counts[tile.to_index()];
            *count = count.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_tiles() {
        let seq = MeldCandidate::Sequence { start: Tile::Tong(7) };
        assert_eq!(seq.tiles().as_slice(), &[Tile::Tong(7), Tile::Tong(8), Tile::Tong(9)]);
        assert!(seq.is_complete_meld());

        let partial = MeldCandidate::Partial {
            first: Tile::Wan(1),
            second: Tile::Wan(3),
        };
        assert_eq!(partial.tiles().len(), 2);
        assert!(!partial.is_complete_meld());
        assert!(!MeldCandidate::Pair { tile: Tile::Zi(1) }.is_complete_meld());
    }

    #[test]
    fn test_chow_validation() {
        assert!(CalledMeld::chow(Tile::Wan(7)).is_some());
        assert!(CalledMeld::chow(Tile::Wan(8)).is_none());
        assert!(CalledMeld::chow(Tile::Zi(1)).is_none());
        assert!(CalledMeld::chow(Tile::Tiao(0)).is_none());
        assert!(CalledMeld::pong(Tile::Zi(8)).is_none());
    }

    #[test]
    fn test_called_meld_tiles() {
        let chow = CalledMeld::chow(Tile::Tiao(3)).unwrap();
        assert_eq!(chow.kind(), CalledMeldKind::Chow);
        assert_eq!(chow.tiles().as_slice(), &[Tile::Tiao(3), Tile::Tiao(4), Tile::Tiao(5)]);

        let kong = CalledMeld::kong(Tile::Zi(5)).unwrap();
        assert_eq!(kong.tiles().len(), 4);

        let mut counts = [0u8; NUM_KINDS];
        chow.accumulate(&mut counts);
        kong.accumulate(&mut counts);
        assert_eq!(counts[Tile::Tiao(4).to_index()], 1);
        assert_eq!(counts[Tile::Zi(5).to_index()], 4);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 7);
    }
}
