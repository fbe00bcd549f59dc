use super::config::ShantenConfig;
use super::error::{Result, ShantenError};
use super::result::{HandShape, HandShapeResult};
use super::seven_pairs::SevenPairsSearch;
use super::standard::{Decomposition, StandardSearch};
use super::thirteen_orphans::ThirteenOrphansSearch;
use super::ShapeSearch;
use crate::tile::{CalledMeld, Tile, TileCounts, NUM_KINDS};
use crate::utils::TileFlags;
use log::trace;
use smallvec::{smallvec, SmallVec};

/// 手牌（含副露）的最大张数
pub const MAX_HAND_SIZE: usize = 14;

/// 七对子和国士无双要求的手牌张数
const CLOSED_HAND_MIN: usize = 13;

/// 校验后的手牌
#[derive(Debug, Clone, Copy)]
struct PreparedHand {
    counts: [u8; NUM_KINDS],
    /// 每种牌在目标中最多能用的张数（物理上限减去副露占用）
    caps: [u8; NUM_KINDS],
    /// 暗手张数
    total: usize,
    /// 是否门前清
    closed: bool,
}

impl PreparedHand {
    /// 七对子和国士无双是否适用
    fn allows_closed_shapes(&self) -> bool {
        self.closed && (CLOSED_HAND_MIN..=MAX_HAND_SIZE).contains(&self.total)
    }
}

/// 需要额外计算的牌集合
#[derive(Debug, Clone, Copy, Default)]
struct Wanted {
    advance: bool,
    discard: bool,
}

/// 单个和牌形的计算结果
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    shape: HandShape,
    shanten: i8,
    advance: TileFlags,
    discard: TileFlags,
}

/// 多个和牌形合并后的结果：只保留向听数最小的和牌形
#[derive(Debug, Clone)]
struct Combined {
    shanten: i8,
    shapes: SmallVec<[HandShape; 3]>,
    advance: TileFlags,
    discard: TileFlags,
}

impl Combined {
    fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        let shanten = evaluations.iter().map(|e| e.shanten).min().unwrap_or(-1);
        let mut combined = Combined {
            shanten,
            shapes: SmallVec::new(),
            advance: TileFlags::new(),
            discard: TileFlags::new(),
        };
        for evaluation in evaluations.iter().filter(|e| e.shanten == shanten) {
            combined.shapes.push(evaluation.shape);
            combined.advance |= evaluation.advance;
            combined.discard |= evaluation.discard;
        }
        combined
    }
}

/// 向听数计算器
///
/// 向听数（Shanten Number）：距离和牌还需要的有效进张次数减一
/// - -1: 已和牌
/// - 0: 听牌
/// - k: k 向听
///
/// 计算是精确的：考虑每种牌最多 4 张（含副露占用），
/// 不会把第五张牌当作有效牌。
///
/// 计算器本身只保存配置，可以在多个线程之间共享
///
/// ```
/// use shanten_engine::{ShantenCalculator, TileCounts, Tile};
///
/// let hand: TileCounts = [
///     Tile::Wan(1), Tile::Wan(2), Tile::Wan(3),
///     Tile::Tong(4), Tile::Tong(5), Tile::Tong(6),
///     Tile::Tiao(7), Tile::Tiao(8), Tile::Tiao(9),
///     Tile::Zi(1), Tile::Zi(1), Tile::Zi(2), Tile::Zi(2),
/// ].into_iter().collect();
///
/// let result = ShantenCalculator::new().best_shanten(&hand).unwrap();
/// assert!(result.is_tenpai());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShantenCalculator {
    config: ShantenConfig,
}

impl ShantenCalculator {
    /// 使用默认配置（四人麻将，不计算有效牌）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ShantenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShantenConfig {
        &self.config
    }

    /// 一般型向听数
    ///
    /// # 参数
    ///
    /// - `hand`: 暗手（0-14 张）
    ///
    /// # 返回
    ///
    /// `n` 张手牌按 `n / 3` 个面子计算，`n % 3 != 0` 时再加一个雀头
    pub fn standard_shanten(&self, hand: &TileCounts) -> Result<HandShapeResult> {
        self.standard_shanten_with_melds(hand, &[])
    }

    /// 一般型向听数（带副露）
    ///
    /// # 参数
    ///
    /// - `hand`: 暗手，张数不超过 `14 - 3 * melds.len()`
    /// - `melds`: 已副露的面子，占用对应的牌
    pub fn standard_shanten_with_melds(&self, hand: &TileCounts, melds: &[CalledMeld]) -> Result<HandShapeResult> {
        let prepared = self.prepare(hand, melds)?;
        let evaluation = self.evaluate(HandShape::Standard, &prepared, self.wanted());
        Ok(self.to_result(&Combined::from_evaluations(&[evaluation])))
    }

    /// 七对子向听数
    ///
    /// 只接受门前清的 13 或 14 张手牌，否则返回 [`ShantenError::InvalidHandSize`]
    pub fn seven_pairs_shanten(&self, hand: &TileCounts) -> Result<HandShapeResult> {
        self.closed_shape_shanten(HandShape::SevenPairs, hand)
    }

    /// 国士无双向听数
    ///
    /// 只接受门前清的 13 或 14 张手牌，否则返回 [`ShantenError::InvalidHandSize`]
    pub fn thirteen_orphans_shanten(&self, hand: &TileCounts) -> Result<HandShapeResult> {
        self.closed_shape_shanten(HandShape::ThirteenOrphans, hand)
    }

    /// 所有适用和牌形中的最小向听数
    ///
    /// 门前清的 13/14 张手牌比较三种和牌形，其他情况只计算一般型。
    /// 向听数相同的和牌形全部保留，有效牌取它们的并集
    pub fn best_shanten(&self, hand: &TileCounts) -> Result<HandShapeResult> {
        self.best_shanten_with_melds(hand, &[])
    }

    /// 所有适用和牌形中的最小向听数（带副露）
    pub fn best_shanten_with_melds(&self, hand: &TileCounts, melds: &[CalledMeld]) -> Result<HandShapeResult> {
        let prepared = self.prepare(hand, melds)?;
        let combined = self.evaluate_all(&prepared, self.wanted());
        Ok(self.to_result(&combined))
    }

    /// 有效牌（进张）
    ///
    /// # 返回
    ///
    /// `(向听数, 有效牌集合)`：摸到后能让某个最优目标多保留一张的牌种，
    /// 即所有最优目标中手牌还缺的牌种的并集。
    /// 对 3n+1 张的手牌，正好是摸到后向听数下降的牌种。
    /// 已经用尽（手牌和副露占满 4 张）的牌种不会出现
    pub fn necessary_tiles(&self, hand: &TileCounts, melds: &[CalledMeld]) -> Result<(i8, TileFlags)> {
        let prepared = self.prepare(hand, melds)?;
        let combined = self.evaluate_all(
            &prepared,
            Wanted {
                advance: true,
                discard: false,
            },
        );
        Ok((combined.shanten, combined.advance))
    }

    /// 可切牌
    ///
    /// # 返回
    ///
    /// `(向听数, 可切牌集合)`：去掉一张后向听数不变的手牌牌种。
    /// 对 3n+2 张的手牌，即打出后不退向的牌
    pub fn unnecessary_tiles(&self, hand: &TileCounts, melds: &[CalledMeld]) -> Result<(i8, TileFlags)> {
        let prepared = self.prepare(hand, melds)?;
        let combined = self.evaluate_all(
            &prepared,
            Wanted {
                advance: false,
                discard: true,
            },
        );
        Ok((combined.shanten, combined.discard))
    }

    /// 一般型的最优拆解
    pub fn decompose_standard(&self, hand: &TileCounts, melds: &[CalledMeld]) -> Result<Decomposition> {
        let prepared = self.prepare(hand, melds)?;
        let decomposition =
            StandardSearch::for_hand_size(prepared.total).decompose(&prepared.counts, &prepared.caps);
        trace!(
            "decomposed {} tiles into {} blocks, {} floating",
            prepared.total,
            decomposition.blocks.len(),
            decomposition.floating.len()
        );
        Ok(decomposition)
    }

    fn wanted(&self) -> Wanted {
        Wanted {
            advance: self.config.advance_tiles,
            discard: false,
        }
    }

    fn closed_shape_shanten(&self, shape: HandShape, hand: &TileCounts) -> Result<HandShapeResult> {
        let prepared = self.prepare(hand, &[])?;
        if !prepared.allows_closed_shapes() {
            return Err(ShantenError::InvalidHandSize {
                total: prepared.total,
                min: CLOSED_HAND_MIN,
                max: MAX_HAND_SIZE,
            });
        }
        let evaluation = self.evaluate(shape, &prepared, self.wanted());
        Ok(self.to_result(&Combined::from_evaluations(&[evaluation])))
    }

    /// 校验手牌并计算每种牌的可用张数
    ///
    /// 先检查每种牌的张数，再检查总张数
    fn prepare(&self, hand: &TileCounts, melds: &[CalledMeld]) -> Result<PreparedHand> {
        let max_copies = self.config.player_count.max_copies();

        let mut called = [0u8; NUM_KINDS];
        for meld in melds {
            meld.accumulate(&mut called);
        }

        let counts = *hand.as_array();
        let mut caps = [0u8; NUM_KINDS];
        for i in 0..NUM_KINDS {
            let used = counts[i].saturating_add(called[i]);
            if used > max_copies[i] {
                return Err(ShantenError::InvalidTileCount {
                    tile: Tile::ALL[i],
                    count: used,
                    max: max_copies[i],
                });
            }
            caps[i] = max_copies[i] - called[i];
        }

        let total = hand.total_count();
        let called_tiles = 3 * melds.len();
        if total + called_tiles > MAX_HAND_SIZE {
            return Err(ShantenError::InvalidHandSize {
                total: total + called_tiles,
                min: 0,
                max: MAX_HAND_SIZE,
            });
        }

        Ok(PreparedHand {
            counts,
            caps,
            total,
            closed: melds.is_empty(),
        })
    }

    /// 计算所有适用的和牌形并合并
    fn evaluate_all(&self, prepared: &PreparedHand, wanted: Wanted) -> Combined {
        let mut evaluations: SmallVec<[Evaluation; 3]> = smallvec![self.evaluate(HandShape::Standard, prepared, wanted)];
        if prepared.allows_closed_shapes() {
            evaluations.push(self.evaluate(HandShape::SevenPairs, prepared, wanted));
            evaluations.push(self.evaluate(HandShape::ThirteenOrphans, prepared, wanted));
        }
        Combined::from_evaluations(&evaluations)
    }

    fn evaluate(&self, shape: HandShape, prepared: &PreparedHand, wanted: Wanted) -> Evaluation {
        let evaluation = match shape {
            HandShape::Standard => run_search(
                shape,
                &StandardSearch::for_hand_size(prepared.total),
                prepared,
                wanted,
            ),
            HandShape::SevenPairs => run_search(shape, &SevenPairsSearch, prepared, wanted),
            HandShape::ThirteenOrphans => run_search(shape, &ThirteenOrphansSearch, prepared, wanted),
        };
        trace!(
            "{:?}: {} tiles, shanten {}",
            shape,
            prepared.total,
            evaluation.shanten
        );
        evaluation
    }

    fn to_result(&self, combined: &Combined) -> HandShapeResult {
        HandShapeResult {
            shanten: combined.shanten,
            shapes: combined.shapes.clone(),
            advance_tiles: self.config.advance_tiles.then_some(combined.advance),
        }
    }
}

fn run_search<S: ShapeSearch>(shape: HandShape, search: &S, prepared: &PreparedHand, wanted: Wanted) -> Evaluation {
    let kept = search.max_kept(&prepared.counts, &prepared.caps);
    Evaluation {
        shape,
        shanten: search.shanten_for(kept),
        advance: if wanted.advance {
            search.advance_tiles(kept, &prepared.counts, &prepared.caps)
        } else {
            TileFlags::new()
        },
        discard: if wanted.discard {
            search.discard_tiles(kept, &prepared.counts, &prepared.caps)
        } else {
            TileFlags::new()
        },
    }
}
