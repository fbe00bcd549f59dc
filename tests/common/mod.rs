#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use shanten_engine::{TileCounts, Wall};

/// 按 `123m456p` 写法构造手牌
pub fn hand(code: &str) -> TileCounts {
    code.parse().unwrap()
}

/// 用固定种子洗牌后发 `count` 副 `size` 张的手牌
pub fn random_hands(seed: u64, size: usize, count: usize) -> Vec<TileCounts> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut hands = Vec::with_capacity(count);
    while hands.len() < count {
        let mut wall = Wall::new();
        wall.shuffle_with(&mut rng);
        while let Some(dealt) = wall.deal(size) {
            hands.push(dealt);
            if hands.len() == count {
                break;
            }
        }
    }
    hands
}

/// 所有可能的面子（刻子和顺子），按 34 种牌的索引表示
pub fn all_melds() -> Vec<[usize; 3]> {
    let mut melds: Vec<[usize; 3]> = (0..34).map(|i| [i, i, i]).collect();
    for suit in 0..3 {
        for start in 0..7 {
            let i = suit * 9 + start;
            melds.push([i, i + 1, i + 2]);
        }
    }
    melds
}

/// 穷举所有目标牌型的一般型向听数，只用于少量面子的小手牌
pub fn brute_force_standard(hand: &TileCounts) -> i8 {
    let counts = *hand.as_array();
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    let melds = total / 3;
    let pair = total % 3 != 0;
    let target_size = (3 * melds + 2 * pair as usize) as i8;

    let candidates = all_melds();
    let mut best = 0i8;
    let mut target = [0u8; 34];
    search(&candidates, 0, melds, pair, &counts, &mut target, &mut best);
    target_size - best - 1
}

fn search(
    candidates: &[[usize; 3]],
    from: usize,
    melds_left: usize,
    pair: bool,
    counts: &[u8; 34],
    target: &mut [u8; 34],
    best: &mut i8,
) {
    if melds_left == 0 {
        if pair {
            for i in 0..34 {
                if target[i] + 2 <= 4 {
                    target[i] += 2;
                    *best = (*best).max(kept(counts, target));
                    target[i] -= 2;
                }
            }
        } else {
            *best = (*best).max(kept(counts, target));
        }
        return;
    }
    for (k, meld) in candidates.iter().enumerate().skip(from) {
        if meld.iter().any(|&i| target[i] + meld.iter().filter(|&&j| j == i).count() as u8 > 4) {
            continue;
        }
        for &i in meld {
            target[i] += 1;
        }
        search(candidates, k, melds_left - 1, pair, counts, target, best);
        for &i in meld {
            target[i] -= 1;
        }
    }
}

fn kept(counts: &[u8; 34], target: &[u8; 34]) -> i8 {
    counts.iter().zip(target).map(|(&c, &t)| c.min(t) as i8).sum()
}
