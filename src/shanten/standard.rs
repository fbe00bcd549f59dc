use super::lookup;
use super::ShapeSearch;
use crate::tile::{MeldCandidate, Suit, Tile, NUM_KINDS};
use smallvec::SmallVec;

/// 一般型最多需要的面子数
pub(crate) const MAX_MELDS: usize = 4;

/// 分组表
///
/// `table[m][p]`：在该组内恰好组成 `m` 个面子、`p` 个雀头的目标牌型时，
/// 手牌中最多能保留的张数；[`UNREACHABLE`] 表示无法组成
pub(crate) type BlockTable = [[i8; 2]; MAX_MELDS + 1];

pub(crate) const UNREACHABLE: i8 = -1;

const EMPTY_TABLE: BlockTable = [[UNREACHABLE; 2]; MAX_MELDS + 1];

/// 数牌一组最多 9 种牌，再加一个终止状态
const MAX_GROUP_LEN: usize = 10;

/// 一般型（4 面子 + 1 雀头）搜索
///
/// 对少于 13 张的手牌同样适用：`n` 张手牌需要 `n / 3` 个面子，
/// `n % 3 != 0` 时还需要一个雀头。
///
/// # 算法
///
/// 目标牌型由面子和雀头组成，每种牌在目标中的张数不能超过剩余的物理张数。
/// 手牌能保留的张数 = Σ min(手牌张数, 目标张数)，向听数由最大保留张数决定。
///
/// 万、筒、条、字四组互不影响，每组按牌种从小到大做动态规划：
/// 在每种牌上分别尝试刻子、以它开头的顺子、雀头或不使用，
/// 状态为（牌种位置，前一张开始的顺子数，前两张开始的顺子数）。
/// 各组的表再做一次背包合并。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StandardSearch {
    melds: usize,
    pair: bool,
}

impl StandardSearch {
    /// 按手牌张数确定目标：`n / 3` 个面子，`n % 3 != 0` 时加一个雀头
    pub(crate) fn for_hand_size(total: usize) -> Self {
        Self {
            melds: (total / 3).min(MAX_MELDS),
            pair: total % 3 != 0,
        }
    }

    fn merged_table(counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> BlockTable {
        let tables = group_tables(counts, caps, lookup::block_table);
        tables[1..]
            .iter()
            .fold(tables[0], |acc, table| merge(&acc, table))
    }
}

impl ShapeSearch for StandardSearch {
    fn target_size(&self) -> u8 {
        (3 * self.melds + 2 * self.pair as usize) as u8
    }

    fn max_kept(&self, counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> u8 {
        let merged = Self::merged_table(counts, caps);
        // 至少 30 种牌保留 3 张以上的余量，目标牌型总能组成
        merged[self.melds][self.pair as usize].max(0) as u8
    }
}

/// 按花色切分后逐组计算分组表
fn group_tables<F>(counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS], mut table_of: F) -> [BlockTable; 4]
where
    F: FnMut(&[u8], &[u8], bool) -> BlockTable,
{
    Suit::all().map(|suit| {
        let range = suit.offset()..suit.offset() + suit.num_kinds();
        table_of(&counts[range.clone()], &caps[range], suit.is_numbered())
    })
}

/// 背包合并两个分组表
pub(crate) fn merge(a: &BlockTable, b: &BlockTable) -> BlockTable {
    let mut result = EMPTY_TABLE;
    for ma in 0..=MAX_MELDS {
        for pa in 0..2 {
            if a[ma][pa] == UNREACHABLE {
                continue;
            }
            for mb in 0..=(MAX_MELDS - ma) {
                for pb in 0..(2 - pa) {
                    if b[mb][pb] == UNREACHABLE {
                        continue;
                    }
                    let cell = &mut result[ma + mb][pa + pb];
                    *cell = (*cell).max(a[ma][pa] + b[mb][pb]);
                }
            }
        }
    }
    result
}

/// 在某一种牌上的选择
#[derive(Debug, Clone, Copy)]
struct Choice {
    /// 以这张牌开头的顺子数
    starts: u8,
    /// 刻子（0 或 1）
    triplet: u8,
    /// 雀头（0 或 1）
    pair: u8,
    /// 目标中这张牌的张数
    need: u8,
}

impl Choice {
    fn melds(&self) -> usize {
        (self.starts + self.triplet) as usize
    }
}

/// 单组（一个数牌花色或字牌）的动态规划
pub(crate) struct GroupSearch<'a> {
    counts: &'a [u8],
    caps: &'a [u8],
    sequences: bool,
    memo: [[[Option<BlockTable>; MAX_MELDS + 1]; MAX_MELDS + 1]; MAX_GROUP_LEN],
}

impl<'a> GroupSearch<'a> {
    pub(crate) fn new(counts: &'a [u8], caps: &'a [u8], sequences: bool) -> Self {
        debug_assert_eq!(counts.len(), caps.len());
        debug_assert!(counts.len() < MAX_GROUP_LEN);
        Self {
            counts,
            caps,
            sequences,
            memo: [[[None; MAX_MELDS + 1]; MAX_MELDS + 1]; MAX_GROUP_LEN],
        }
    }

    /// 整组的分组表
    pub(crate) fn table(&mut self) -> BlockTable {
        self.solve(0, 0, 0)
    }

    fn choices(&self, i: usize, run1: u8, run2: u8) -> SmallVec<[Choice; 20]> {
        let mut result = SmallVec::new();
        let carried = run1 + run2;
        let cap = self.caps[i];
        if carried > cap {
            return result;
        }
        let max_starts = if self.sequences && i + 2 < self.counts.len() {
            cap - carried
        } else {
            0
        };
        for triplet in 0..=1u8 {
            for starts in 0..=max_starts {
                for pair in 0..=1u8 {
                    let need = carried + starts + 3 * triplet + 2 * pair;
                    if need > cap || (starts + triplet) as usize > MAX_MELDS {
                        continue;
                    }
                    result.push(Choice {
                        starts,
                        triplet,
                        pair,
                        need,
                    });
                }
            }
        }
        result
    }

    fn gain(&self, i: usize, choice: &Choice) -> i8 {
        self.counts[i].min(choice.need) as i8
    }

    /// `run1`：前一张开始的顺子数，`run2`：前两张开始的顺子数
    fn solve(&mut self, i: usize, run1: u8, run2: u8) -> BlockTable {
        if i == self.counts.len() {
            let mut table = EMPTY_TABLE;
            if run1 == 0 && run2 == 0 {
                table[0][0] = 0;
            }
            return table;
        }
        if let Some(table) = self.memo[i][run1 as usize][run2 as usize] {
            return table;
        }

        let mut table = EMPTY_TABLE;
        for choice in self.choices(i, run1, run2) {
            let gain = self.gain(i, &choice);
            let sub = self.solve(i + 1, choice.starts, run1);
            let melds = choice.melds();
            let pair = choice.pair as usize;
            for m in 0..=(MAX_MELDS - melds) {
                for p in 0..(2 - pair) {
                    if sub[m][p] == UNREACHABLE {
                        continue;
                    }
                    let cell = &mut table[m + melds][p + pair];
                    *cell = (*cell).max(sub[m][p] + gain);
                }
            }
        }

        self.memo[i][run1 as usize][run2 as usize] = Some(table);
        table
    }

    /// 还原出一组达到 `table[melds][pair]` 的目标面子
    ///
    /// `offset` 为该组第一张牌的索引
    fn trace(&mut self, melds: usize, pair: usize, offset: usize, out: &mut SmallVec<[MeldCandidate; 5]>) {
        let (mut i, mut run1, mut run2) = (0usize, 0u8, 0u8);
        let (mut melds, mut pair) = (melds, pair);

        while i < self.counts.len() {
            let target = self.solve(i, run1, run2)[melds][pair];
            if target == UNREACHABLE {
                return;
            }
            let mut next = None;
            for choice in self.choices(i, run1, run2) {
                if choice.melds() > melds || choice.pair as usize > pair {
                    continue;
                }
                let sub = self.solve(i + 1, choice.starts, run1);
                let rest = sub[melds - choice.melds()][pair - choice.pair as usize];
                if rest != UNREACHABLE && rest + self.gain(i, &choice) == target {
                    next = Some(choice);
                    break;
                }
            }
            let Some(choice) = next else {
                return;
            };

            let tile = Tile::ALL[offset + i];
            if choice.triplet == 1 {
                out.push(MeldCandidate::Triplet { tile });
            }
            for _ in 0..choice.starts {
                out.push(MeldCandidate::Sequence { start: tile });
            }
            if choice.pair == 1 {
                out.push(MeldCandidate::Pair { tile });
            }

            melds -= choice.melds();
            pair -= choice.pair as usize;
            run2 = run1;
            run1 = choice.starts;
            i += 1;
        }
    }
}

/// 目标牌型中的一个组合，以及手牌中与之对应的牌
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    /// 目标面子或雀头
    pub target: MeldCandidate,
    /// 手牌中已有的牌
    pub held: SmallVec<[Tile; 3]>,
    /// 还缺的牌
    pub missing: SmallVec<[Tile; 3]>,
}

impl Block {
    /// 是否已经完成
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// 已有的牌构成的组合
    ///
    /// 完整面子、对子或两张的不完整面子；只有一张或没有时返回 `None`
    pub fn candidate(&self) -> Option<MeldCandidate> {
        match (self.held.as_slice(), self.target) {
            (held, target) if held.len() == 3 => Some(target),
            ([tile, _], MeldCandidate::Pair { .. }) => Some(MeldCandidate::Pair { tile: *tile }),
            ([first, second], _) => Some(MeldCandidate::Partial {
                first: *first,
                second: *second,
            }),
            _ => None,
        }
    }
}

/// 一般型的最优拆解
///
/// 多种拆解同样最优时，返回按牌种顺序搜索到的第一种：
/// 所有最优拆解的浮牌张数都相同
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Decomposition {
    /// 一般型向听数
    pub shanten: i8,
    /// 目标面子和雀头
    pub blocks: SmallVec<[Block; 5]>,
    /// 不属于任何组合的浮牌
    pub floating: SmallVec<[Tile; 14]>,
}

impl Decomposition {
    /// 已完成的面子数
    pub fn complete_melds(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.target.is_complete_meld() && b.is_complete())
            .count()
    }
}

impl StandardSearch {
    /// 还原一个最优拆解
    pub(crate) fn decompose(&self, counts: &[u8; NUM_KINDS], caps: &[u8; NUM_KINDS]) -> Decomposition {
        let mut searches: Vec<GroupSearch<'_>> = Suit::all()
            .iter()
            .map(|suit| {
                let range = suit.offset()..suit.offset() + suit.num_kinds();
                GroupSearch::new(&counts[range.clone()], &caps[range], suit.is_numbered())
            })
            .collect();
        let tables: Vec<BlockTable> = searches.iter_mut().map(|s| s.table()).collect();

        let best = tables[1..]
            .iter()
            .fold(tables[0], |acc, table| merge(&acc, table))[self.melds][self.pair as usize];

        let mut targets: SmallVec<[MeldCandidate; 5]> = SmallVec::new();
        if let Some(split) = split_targets(&tables, self.melds, self.pair as usize, best) {
            for ((search, suit), (melds, pair)) in searches.iter_mut().zip(Suit::all()).zip(split) {
                search.trace(melds, pair, suit.offset(), &mut targets);
            }
        }

        let mut remaining = *counts;
        let blocks = targets
            .into_iter()
            .map(|target| {
                let mut held = SmallVec::new();
                let mut missing = SmallVec::new();
                for tile in target.tiles() {
                    let count = &mut remaining[tile.to_index()];
                    if *count > 0 {
                        *count -= 1;
                        held.push(tile);
                    } else {
                        missing.push(tile);
                    }
                }
                Block {
                    target,
                    held,
                    missing,
                }
            })
            .collect();

        let floating = Tile::ALL
            .iter()
            .zip(remaining.iter())
            .flat_map(|(tile, &count)| std::iter::repeat(*tile).take(count as usize))
            .collect();

        Decomposition {
            shanten: self.shanten_for(best.max(0) as u8),
            blocks,
            floating,
        }
    }
}

/// 找出各组分别承担多少面子和雀头
fn split_targets(tables: &[BlockTable], melds: usize, pair: usize, best: i8) -> Option<[(usize, usize); 4]> {
    if best == UNREACHABLE || tables.len() != 4 {
        return None;
    }
    for m0 in 0..=melds {
        for m1 in 0..=(melds - m0) {
            for m2 in 0..=(melds - m0 - m1) {
                let m3 = melds - m0 - m1 - m2;
                for p0 in 0..=pair {
                    for p1 in 0..=(pair - p0) {
                        for p2 in 0..=(pair - p0 - p1) {
                            let p3 = pair - p0 - p1 - p2;
                            let split = [(m0, p0), (m1, p1), (m2, p2), (m3, p3)];
                            let kept: Option<i8> = split
                                .iter()
                                .zip(tables)
                                .map(|(&(m, p), table)| Some(table[m][p]).filter(|&v| v != UNREACHABLE))
                                .sum();
                            if kept == Some(best) {
                                return Some(split);
                            }
                        }
                    }
                }
            }
        }
    }
    None
}
