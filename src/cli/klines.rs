//! # klines 子命令 CLI 定义
//!
//! 两层 k 线生成器的参数表单，各字段默认值即 Γ 点附近的典型设置。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/klines.rs`

use clap::Args;
use std::path::PathBuf;

pub const KLINES_HELP: &str = "\
Generates two-tier band structure lines for FHI-aims:

1. SPARSE GRID: Background coverage over a wider range
   - Does NOT need to include the center point

2. DENSE GRID: Detailed coverage around the Dirac cone
   - ALWAYS includes the exact center point

The tool automatically:
- Removes duplicate lines
- Sorts lines by x-coordinate
- Marks the center line with * in labels

Output format:
output band start_kx start_ky start_kz end_kx end_ky end_kz n_points label_start label_end

Example for Gamma point:
    Sparse grid: 10 lines from -0.2 to 0.2
    Dense grid: 10 lines from -0.05 to 0.05 (includes G)

Example for K point:
    Sparse grid: 10 lines from 0.133 to 0.533 (K_x +/- 0.2)
    Dense grid: 10 lines from 0.283 to 0.383 (K_x +/- 0.05, includes K)";

/// klines 子命令参数
#[derive(Args, Debug)]
pub struct KlinesArgs {
    /// Center point (G, K, or M)
    #[arg(short, long, default_value = "G")]
    pub center: String,

    /// Sparse X range (min,max)
    #[arg(long, default_value = "-0.2,0.2", allow_hyphen_values = true)]
    pub sparse_range: String,

    /// Sparse density (number of lines)
    #[arg(long, default_value_t = 10)]
    pub sparse_density: usize,

    /// Cone X range (min,max)
    #[arg(long, default_value = "-0.05,0.05", allow_hyphen_values = true)]
    pub cone_range: String,

    /// Cone density (number of lines)
    #[arg(long, default_value_t = 10)]
    pub cone_density: usize,

    /// Y range for all lines (start,end)
    #[arg(long, default_value = "0.0,0.5", allow_hyphen_values = true)]
    pub y_range: String,

    /// Points per line
    #[arg(long, default_value_t = 41)]
    pub points_per_line: usize,

    /// Output file (default: band_lines_<center>_twotier.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview plot file, PNG or SVG by extension (default: output file with .png)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Skip the preview plot
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,
}
