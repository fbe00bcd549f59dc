use super::ShapeSearch;
use crate::tile::NUM_KINDS;

/// 七对子的对子数
pub(crate) const PAIRS: u8 = 7;

/// 七对子搜索
///
/// 目标为 7 种不同的牌各 2 张。只有剩余可用张数不少于 2 的牌才能成为目标中的对子，
/// 所以同一种牌的 4 张只算一个对子，剩余可用不足 2 张的牌无法组成对子。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SevenPairsSearch;

impl ShapeSearch for SevenPairsSearch {
    fn target_size(&self) -> u8 {
        2 * PAIRS
    }

    fn max_kept(&self, counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> u8 {
        let (mut pairs, mut singles) = (0u8, 0u8);
        for (&count, &cap) in counts.iter().zip(caps) {
            if cap < 2 {
                continue;
            }
            match count {
                0 => {}
                1 => singles += 1,
                _ => pairs += 1,
            }
        }
        let pairs = pairs.min(PAIRS);
        2 * pairs + singles.min(PAIRS - pairs)
    }
}
