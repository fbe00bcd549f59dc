use super::counts::TileCounts;
use super::tile::{Tile, MAX_COPIES};
use crate::shanten::config::PlayerCount;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// 牌墙（Wall）
///
/// 四人麻将 136 张，三人麻将去掉 2-8 万共 108 张
///
/// 主要用于生成随机手牌（测试、基准测试）
#[derive(Debug, Clone)]
pub struct Wall {
    /// 牌堆（从后往前抽取）
    tiles: Box<[Tile]>,
    /// 已抽取的牌数
    drawn_count: usize,
}

impl Wall {
    /// 创建一副完整的四人麻将牌墙（136 张，未洗牌）
    pub fn new() -> Self {
        Self::for_players(PlayerCount::Four)
    }

    /// 按人数创建牌墙（未洗牌）
    pub fn for_players(player_count: PlayerCount) -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);
        for tile in Tile::ALL {
            if !player_count.uses_tile(tile) {
                continue;
            }
            for _ in 0..MAX_COPIES {
                tiles.push(tile);
            }
        }

        Self {
            tiles: tiles.into_boxed_slice(),
            drawn_count: 0,
        }
    }

    /// 洗牌（线程随机数）
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut thread_rng());
    }

    /// 使用指定随机数生成器洗牌，便于复现
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
        self.drawn_count = 0;
    }

    /// 抽取一张牌（从牌堆末尾）
    ///
    /// # Returns
    ///
    /// - `Some(Tile)`：成功抽取一张牌
    /// - `None`：牌堆已空
    pub fn draw(&mut self) -> Option<Tile> {
        if self.drawn_count >= self.tiles.len() {
            return None;
        }
        let index = self.tiles.len() - 1 - self.drawn_count;
        self.drawn_count += 1;
        Some(self.tiles[index])
    }

    /// 连续抽取 `n` 张组成手牌
    ///
    /// 牌墙不足时返回 `None`，已抽取的牌不会放回
    pub fn deal(&mut self, n: usize) -> Option<TileCounts> {
        if self.remaining_count() < n {
            return None;
        }
        let mut hand = TileCounts::new();
        for _ in 0..n {
            let tile = self.draw()?;
            hand.add_tile(tile);
        }
        Some(hand)
    }

    /// 查询剩余牌数
    pub fn remaining_count(&self) -> usize {
        self.tiles.len().saturating_sub(self.drawn_count)
    }

    /// 检查牌堆是否为空
    pub fn is_empty(&self) -> bool {
        self.remaining_count() == 0
    }

    /// 获取已抽取的牌数
    pub fn drawn_count(&self) -> usize {
        self.drawn_count
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.tiles.len()
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}
