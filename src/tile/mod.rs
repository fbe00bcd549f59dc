/// 牌相关模块
///
/// 包含牌（Tile）、手牌计数（TileCounts，支持 `123m456p` 写法）、面子（MeldCandidate / CalledMeld）和牌墙（Wall）

pub mod tile;
pub mod counts;
pub mod meld;
pub mod wall;

// 重新导出常用类型
pub use tile::{Tile, Suit, NUM_KINDS, MAX_COPIES, TERMINAL_AND_HONOR_INDICES};
pub use counts::{ParseTilesError, TileCounts};
pub use meld::{MeldCandidate, CalledMeld, CalledMeldKind};
pub use wall::Wall;
