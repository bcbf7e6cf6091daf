//! # k 线生成模块
//!
//! 在高对称点附近生成两层（稀疏 + 加密）平行 k 线。
//!
//! ## 子模块
//! - `generator`: x 位置生成、中心点对齐、去重与指令文件写出
//! - `plot`: 预览图
//!
//! ## 依赖关系
//! - 被 `commands/klines.rs` 使用
//! - 使用 `models/kpath.rs`

pub mod generator;
pub mod plot;

pub use generator::{generate_band_lines, write_band_lines, KLineSpec};
