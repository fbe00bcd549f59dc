use super::standard::{BlockTable, GroupSearch};
use crate::utils::bitops::pack_counts;
use log::debug;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// 默认最大缓存条目数
pub const DEFAULT_MAX_ENTRIES: usize = 1 << 16;

/// 分组表缓存
///
/// 一组牌（某个花色或字牌）的计数和可用张数决定了它的分组表，
/// 不同手牌之间大量重复，缓存后可以直接复用。
///
/// 读多写少，使用读写锁；超过上限后清空（与胡牌判定器的缓存策略相同）
pub struct BlockTableCache {
    tables: RwLock<HashMap<u64, BlockTable>>,
    max_entries: usize,
}

impl BlockTableCache {
    /// 创建缓存（自定义上限）
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.tables.read().map(|tables| tables.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 最大条目数
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// 清空缓存
    pub fn clear(&self) {
        if let Ok(mut tables) = self.tables.write() {
            tables.clear();
        }
    }

    /// 查找分组表，不存在时计算并写入
    ///
    /// 锁中毒时直接计算，不使用缓存
    pub(crate) fn get_or_compute<F>(&self, key: u64, compute: F) -> BlockTable
    where
        F: FnOnce() -> BlockTable,
    {
        if let Ok(tables) = self.tables.read() {
            if let Some(table) = tables.get(&key) {
                return *table;
            }
        }

        let table = compute();

        if let Ok(mut tables) = self.tables.write() {
            if tables.len() >= self.max_entries {
                debug!("block table cache full ({} entries), clearing", tables.len());
                tables.clear();
            }
            tables.insert(key, table);
        }
        table
    }
}

impl Default for BlockTableCache {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

/// 全局分组表缓存（懒加载，线程安全）
static BLOCK_TABLE_CACHE: OnceLock<BlockTableCache> = OnceLock::new();

/// 获取全局缓存
///
/// 第一次计算时会自动初始化；也可以在启动时显式调用，
/// 之后所有线程共享同一份只增不改的缓存
pub fn init() -> &'static BlockTableCache {
    BLOCK_TABLE_CACHE.get_or_init(|| {
        debug!("initializing block table cache (max {} entries)", DEFAULT_MAX_ENTRIES);
        BlockTableCache::default()
    })
}

/// 缓存键：计数（27 位）| 可用张数（27 位）| 是否允许顺子
fn cache_key(counts: &[u8], caps: &[u8], sequences: bool) -> u64 {
    (pack_counts(counts) as u64) | ((pack_counts(caps) as u64) << 27) | ((sequences as u64) << 54)
}

/// 获取一组牌的分组表
pub(crate) fn block_table(counts: &[u8], caps: &[u8], sequences: bool) -> BlockTable {
    init().get_or_compute(cache_key(counts, caps, sequences), || {
        GroupSearch::new(counts, caps, sequences).table()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_distinguishes_groups() {
        let caps = [4u8; 9];
        let a = cache_key(&[1, 1, 1, 0, 0, 0, 0, 0, 0], &caps, true);
        let b = cache_key(&[1, 1, 1, 0, 0, 0, 0, 0, 0], &caps, false);
        let c = cache_key(&[1, 1, 1, 0, 0, 0, 0, 0, 0], &[4, 0, 4, 4, 4, 4, 4, 4, 4], true);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cached_table_matches_direct_search() {
        let counts = [0, 2, 1, 1, 0, 0, 3, 0, 1];
        let caps = [4u8; 9];
        let direct = GroupSearch::new(&counts, &caps, true).table();
        assert_eq!(block_table(&counts, &caps, true), direct);
        // 第二次命中缓存
        assert_eq!(block_table(&counts, &caps, true), direct);
        assert!(!init().is_empty());
    }

    #[test]
    fn test_cache_clears_when_full() {
        let cache = BlockTableCache::with_max_entries(2);
        let caps = [4u8; 7];
        for (key, counts) in [[1u8, 0, 0, 0, 0, 0, 0], [2, 0, 0, 0, 0, 0, 0], [3, 0, 0, 0, 0, 0, 0]]
            .iter()
            .enumerate()
        {
            cache.get_or_compute(key as u64, || GroupSearch::new(counts, &caps, false).table());
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.max_entries(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
