//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `grid`: 从 band 文件提取 HOMO/LUMO 网格
//! - `klines`: 生成两层 `output band` 指令
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: grid, klines

pub mod grid;
pub mod klines;

use clap::{Parser, Subcommand};

/// aimskit - FHI-aims 能带计算辅助工具
#[derive(Parser, Debug)]
#[command(name = "aimskit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "FHI-aims band-structure helpers", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract k-points and HOMO/LUMO eigenvalues from band*.out into .grd files
    Grid(grid::GridArgs),

    /// Generate two-tier (sparse + dense) band structure lines around a high-symmetry point
    #[command(long_about = klines::KLINES_HELP)]
    Klines(klines::KlinesArgs),
}
