use super::ShapeSearch;
use crate::tile::{NUM_KINDS, TERMINAL_AND_HONOR_INDICES};

/// 国士无双搜索
///
/// 目标为 13 种幺九牌各 1 张，其中一种再多 1 张。
/// 三人麻将中 1m、9m 仍然存在，所以目标不变；
/// 剩余可用张数为 0 的幺九牌不能计入，可用张数不足 2 的牌不能作为雀头。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ThirteenOrphansSearch;

impl ShapeSearch for ThirteenOrphansSearch {
    fn target_size(&self) -> u8 {
        14
    }

    fn max_kept(&self, counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> u8 {
        let mut kinds = 0u8;
        let mut has_pair = false;
        for &i in TERMINAL_AND_HONOR_INDICES.iter() {
            if caps[i] == 0 || counts[i] == 0 {
                continue;
            }
            kinds += 1;
            if counts[i] >= 2 && caps[i] >= 2 {
                has_pair = true;
            }
        }
        kinds + has_pair as u8
    }
}
