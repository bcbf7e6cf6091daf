//! # grid 命令实现
//!
//! 从 FHI-aims band*.out 提取 k 点与 HOMO/LUMO 本征值，写出可视化用的网格文件。
//!
//! ## 功能
//! - 自动识别 SOC 计算（存在 band*.out.no_soc）
//! - 解析全部 band 文件并拼接
//! - 写出 KX.grd, KY.grd
//! - 按占据数定位 HOMO/LUMO，写出 BAND_HOMO.grd, BAND_LUMO.grd
//! - 读取主输出中的费米能级、VBM、CBM（仅作提示：band 文件本身已相对费米能级）
//! - 终端打印带边统计表，可选导出 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/grid.rs` 定义的参数
//! - 使用 `parsers/band_out.rs`, `parsers/aims_out.rs`
//! - 使用 `band/` 模块
//! - 使用 `utils/output.rs`

use crate::band::{export, find_homo_lumo, grid, BandEdges};
use crate::cli::grid::GridArgs;
use crate::error::{AimskitError, Result};
use crate::parsers::aims_out;
use crate::parsers::band_out::{self, BandVariant};
use crate::utils::output;

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 默认主输出文件名
const DEFAULT_OUTPUT_FILE: &str = "aims.out";

/// 带边统计表行
#[derive(Debug, Clone, Tabled)]
struct RangeRow {
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Min (eV)")]
    min: String,
    #[tabled(rename = "Max (eV)")]
    max: String,
}

impl RangeRow {
    fn new(quantity: &str, band: String, (min, max): (f64, f64)) -> Self {
        RangeRow {
            quantity: quantity.to_string(),
            band,
            min: format!("{:.4}", min),
            max: format!("{:.4}", max),
        }
    }
}

/// 执行 grid 命令
pub fn execute(args: GridArgs) -> Result<()> {
    output::print_header("FHI-aims HOMO/LUMO Grid Extraction");

    if !args.dir.is_dir() {
        return Err(AimskitError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    let output_file = resolve_output_file(args.output_file.as_deref(), &args.dir);

    let soc = args.soc || band_out::detect_soc(&args.dir);
    let variant = if args.no_soc_bands {
        BandVariant::NoSoc
    } else {
        BandVariant::Primary
    };
    // band*.out.no_soc 对应主输出中 SOC 段之前的数值
    let soc_values = soc && variant == BandVariant::Primary;

    output::print_info("Parsing FHI-aims band files...");
    let (files, data) = band_out::parse_band_files(&args.dir, variant)?;
    output::print_info(&format!("Found {} band files", files.len()));
    output::print_info(&format!("SOC calculation: {}", soc));
    output::print_info(&format!("Total k-points: {}", data.len()));

    write_grid(&data.k_component(0), &args.dir, "KX.grd")?;
    write_grid(&data.k_component(1), &args.dir, "KY.grd")?;

    let (homo, lumo) = find_homo_lumo(&data.occupations);
    output::print_info(&format!("HOMO band index: {}", format_index(homo)));
    output::print_info(&format!("LUMO band index: {}", format_index(lumo)));

    let (homo, lumo) = match (homo, lumo) {
        (Some(h), Some(l)) => (h, l),
        _ => {
            output::print_error("Could not determine HOMO/LUMO bands");
            return Ok(());
        }
    };

    let edges = BandEdges::extract(&data, homo, lumo);
    if edges.is_inverted() {
        output::print_warning(&format!(
            "HOMO index {} is not below LUMO index {} (non-monotonic occupations)",
            homo, lumo
        ));
    }

    if let Some(log_file) = aims_out::locate_output_file(&output_file) {
        report_log_values(&log_file, soc_values);
    }

    write_grid(&edges.homo, &args.dir, "BAND_HOMO.grd")?;
    write_grid(&edges.lumo, &args.dir, "BAND_LUMO.grd")?;

    print_statistics(&edges);

    if let Some(ref csv_path) = args.csv {
        export::to_csv(&data, &edges, csv_path)?;
        output::print_success(&format!("Band edges exported to '{}'", csv_path.display()));
    }

    output::print_done(&format!(
        "Grids written for {} k-points in '{}'",
        data.len(),
        args.dir.display()
    ));

    Ok(())
}

/// 主输出文件：命令行给出则直接使用，否则自动检测，最后退回 aims.out
fn resolve_output_file(given: Option<&Path>, dir: &Path) -> PathBuf {
    if let Some(path) = given {
        return path.to_path_buf();
    }

    match aims_out::detect_output_file(dir) {
        Some(found) => {
            output::print_info(&format!("Auto-detected output file: {}", found.display()));
            found
        }
        None => dir.join(DEFAULT_OUTPUT_FILE),
    }
}

/// 打印主输出中的费米能级、VBM、CBM（同一文件）
fn report_log_values(log_file: &Path, soc: bool) {
    if let Some(ef) = aims_out::read_fermi_energy(log_file, soc) {
        output::print_info(&format!("Fermi energy from output: {} eV", ef));
        output::print_info("Note: Band files already reference eigenvalues to Fermi level");
    }

    let (vbm, cbm) = aims_out::read_vbm_cbm(log_file, soc);
    if let Some(v) = vbm {
        output::print_info(&format!("VBM from output: {} eV", v));
    }
    if let Some(c) = cbm {
        output::print_info(&format!("CBM from output: {} eV", c));
    }
}

fn write_grid(values: &[f64], dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(name);
    grid::save_grid_file(values, &path)?;
    output::print_written(&path.display().to_string());
    Ok(())
}

fn format_index(index: Option<usize>) -> String {
    index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "undetermined".to_string())
}

/// 打印 HOMO/LUMO 能量范围与带隙范围
fn print_statistics(edges: &BandEdges) {
    let rows = vec![
        RangeRow::new("HOMO energy", edges.homo_index.to_string(), edges.homo_range()),
        RangeRow::new("LUMO energy", edges.lumo_index.to_string(), edges.lumo_range()),
        RangeRow::new(
            "Band gap",
            format!("{} -> {}", edges.homo_index, edges.lumo_index),
            edges.gap_range(),
        ),
    ];

    output::print_header("Band Edge Statistics");
    println!("{}", Table::new(&rows));
    output::print_separator();
}
