//! # 能带分析模块
//!
//! HOMO/LUMO 能带定位以及网格文件输出。
//!
//! ## 子模块
//! - `edges`: 按占据数阈值定位 HOMO/LUMO，统计带边能量
//! - `grid`: 单列 .grd 网格文件读写
//! - `export`: 汇总 CSV 导出
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 使用
//! - 使用 `models/band.rs`

pub mod edges;
pub mod export;
pub mod grid;

pub use edges::{find_homo_lumo, BandEdges};
