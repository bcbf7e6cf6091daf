//! # klines 命令实现
//!
//! 两层 k 线生成的表单流程：校验参数、生成指令、写出文件、打印统计，
//! 最后尽力生成预览图（失败只给出警告）。
//!
//! ## 依赖关系
//! - 使用 `cli/klines.rs` 定义的参数
//! - 使用 `kpath/` 模块
//! - 使用 `utils/output.rs`

use crate::cli::klines::KlinesArgs;
use crate::error::Result;
use crate::kpath::{generate_band_lines, plot, write_band_lines, KLineSpec};
use crate::models::HighSymmetryPoint;
use crate::utils::output;

use std::path::{Path, PathBuf};

const PREVIEW_WIDTH: u32 = 1000;
const PREVIEW_HEIGHT: u32 = 600;

/// 执行 klines 命令
pub fn execute(args: KlinesArgs) -> Result<()> {
    output::print_header("FHI-aims Band Structure Lines Generator (Two-tier)");

    let spec = KLineSpec::from_form(
        &args.center,
        &args.sparse_range,
        args.sparse_density,
        &args.cone_range,
        args.cone_density,
        &args.y_range,
        args.points_per_line,
    )?;

    let set = generate_band_lines(&spec);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(set.center));

    write_band_lines(&spec, &set, &output_path)?;

    output::print_success("Generated band structure lines:");
    println!("  - Sparse grid: {} lines requested", spec.sparse_density);
    println!("  - Dense grid: {} lines requested", spec.cone_density);
    println!("  - Total unique lines: {}", set.lines.len());
    println!("  - Duplicates removed: {}", set.duplicates_removed());
    if let Some(idx) = set.center_line {
        println!("  - Center line: #{} ({}*)", idx + 1, set.center);
    }
    output::print_done(&format!("Saved to: {}", output_path.display()));

    if !args.no_plot {
        let plot_path = args
            .plot
            .clone()
            .unwrap_or_else(|| default_plot_path(&output_path));

        if plot_path == output_path {
            output::print_warning(&format!(
                "Preview plot skipped: '{}' is the band lines file",
                plot_path.display()
            ));
        } else {
            match plot::generate_preview(&spec, &plot_path, PREVIEW_WIDTH, PREVIEW_HEIGHT) {
                Ok(()) => {
                    output::print_success(&format!("Preview saved to '{}'", plot_path.display()))
                }
                Err(e) => output::print_warning(&format!("Preview plot skipped: {}", e)),
            }
        }
    }

    Ok(())
}

/// 保存对话框的建议文件名
fn default_output_path(center: HighSymmetryPoint) -> PathBuf {
    PathBuf::from(format!(
        "band_lines_{}_twotier.txt",
        center.symbol().to_lowercase()
    ))
}

/// 预览图默认路径：`{stem}_preview.png`，与指令文件同目录
fn default_plot_path(output_path: &Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "band_lines".to_string());
    output_path.with_file_name(format!("{}_preview.png", stem))
}
