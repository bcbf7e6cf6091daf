//! # grid 子命令 CLI 定义
//!
//! 从 FHI-aims band*.out 文件生成 KX/KY/BAND_HOMO/BAND_LUMO 网格文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/grid.rs`

use clap::Args;
use std::path::PathBuf;

/// grid 子命令参数
#[derive(Args, Debug)]
pub struct GridArgs {
    /// FHI-aims main output file (auto-detected from *.out when omitted, default aims.out)
    pub output_file: Option<PathBuf>,

    /// Directory containing band*.out files; .grd files are written here too
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Treat the calculation as SOC even if no band*.out.no_soc files are present
    #[arg(long, default_value_t = false)]
    pub soc: bool,

    /// Parse band*.out.no_soc (bands without SOC) instead of band*.out
    #[arg(long, default_value_t = false, conflicts_with = "soc")]
    pub no_soc_bands: bool,

    /// Also export k-points and HOMO/LUMO energies to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
