/// 工具模块
///
/// 位运算相关的集合与编码

pub mod bitops;

pub use bitops::TileFlags;
