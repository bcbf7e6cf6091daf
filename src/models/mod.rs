//! # 数据模型模块
//!
//! 定义能带数据与 k 线指令的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`band/`、`kpath/` 和 `commands/` 使用
//! - 子模块: band, kpath

pub mod band;
pub mod kpath;

pub use band::BandData;
pub use kpath::{BandLine, BandLineSet, HighSymmetryPoint};
