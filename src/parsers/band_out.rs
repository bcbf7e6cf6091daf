//! # FHI-aims band*.out 解析器
//!
//! 解析 `output band` 产生的能带文件，提取 k 点、占据数和本征值。
//!
//! ## band 文件格式说明
//! ```text
//! idx  kx  ky  kz  occ_1 eig_1  occ_2 eig_2  ...
//! 1    0.0 0.0 0.0 2.0 -10.123  2.0  -5.432   ...
//! ```
//! - 第 0 列为行号（忽略），第 1-3 列为分数坐标
//! - 其后按 (占据数, 本征值) 成对出现，每条能带一对
//! - SOC 计算时，`band*.out` 为含 SOC 的能带，`band*.out.no_soc` 为不含 SOC 的能带
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 使用
//! - 使用 `models/band.rs`
//! - 使用 `utils/progress.rs`

use crate::error::{AimskitError, Result};
use crate::models::BandData;
use crate::parsers::glob_in_dir;
use crate::utils::progress;

use std::fs;
use std::path::{Path, PathBuf};

/// 选择哪一组 band 文件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandVariant {
    /// `band*.out`（SOC 计算时即含 SOC 的能带）
    #[default]
    Primary,
    /// `band*.out.no_soc`
    NoSoc,
}

impl BandVariant {
    fn pattern(&self) -> &'static str {
        match self {
            BandVariant::Primary => "band*.out",
            BandVariant::NoSoc => "band*.out.no_soc",
        }
    }
}

/// 目录中存在 `band*.out.no_soc` 即视为 SOC 计算
pub fn detect_soc(dir: &Path) -> bool {
    glob_in_dir(dir, BandVariant::NoSoc.pattern())
        .map(|files| !files.is_empty())
        .unwrap_or(false)
}

/// 按文件名字典序选出 band 文件
pub fn select_band_files(dir: &Path, variant: BandVariant) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob_in_dir(dir, variant.pattern())?
        .into_iter()
        .filter(|p| match variant {
            BandVariant::Primary => !p.to_string_lossy().ends_with(".no_soc"),
            BandVariant::NoSoc => true,
        })
        .collect();

    if files.is_empty() {
        return Err(AimskitError::NoFilesFound {
            pattern: dir.join(variant.pattern()).display().to_string(),
        });
    }

    Ok(files)
}

/// 解析目录中所选的全部 band 文件并按文件顺序拼接
pub fn parse_band_files(dir: &Path, variant: BandVariant) -> Result<(Vec<PathBuf>, BandData)> {
    let files = select_band_files(dir, variant)?;

    let pb = progress::create_progress_bar(files.len() as u64, "Parsing band files");
    let mut data = BandData::new();

    for file in &files {
        let parsed = parse_band_file(file)?;
        check_band_count(&data, &parsed, file)?;
        data.append(parsed);
        pb.inc(1);
    }

    pb.finish_and_clear();

    Ok((files, data))
}

/// 解析单个 band 文件
pub fn parse_band_file(path: &Path) -> Result<BandData> {
    let content = fs::read_to_string(path).map_err(|e| AimskitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_band_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 band 文件
///
/// 少于 4 列的行直接跳过；多出的奇数列（不成对）被丢弃。
pub fn parse_band_content(content: &str, name: &str) -> Result<BandData> {
    let mut data = BandData::new();

    for (lineno, line) in content.lines().enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }

        let values = parts[1..]
            .iter()
            .map(|s| s.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| AimskitError::ParseError {
                format: "band".to_string(),
                path: name.to_string(),
                reason: format!("Invalid number at line {}: {}", lineno + 1, e),
            })?;

        let kpoint = [values[0], values[1], values[2]];

        let (occupations, eigenvalues): (Vec<f64>, Vec<f64>) = values[3..]
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .unzip();

        if !data.is_empty() && occupations.len() != data.n_bands() {
            return Err(AimskitError::ParseError {
                format: "band".to_string(),
                path: name.to_string(),
                reason: format!(
                    "Line {} has {} bands, expected {}",
                    lineno + 1,
                    occupations.len(),
                    data.n_bands()
                ),
            });
        }

        data.push_row(kpoint, occupations, eigenvalues);
    }

    Ok(data)
}

/// 检查新文件的能带数与已解析数据一致
fn check_band_count(current: &BandData, next: &BandData, path: &Path) -> Result<()> {
    if current.is_empty() || next.is_empty() || current.n_bands() == next.n_bands() {
        return Ok(());
    }

    Err(AimskitError::ParseError {
        format: "band".to_string(),
        path: path.display().to_string(),
        reason: format!(
            "File has {} bands, previous files have {}",
            next.n_bands(),
            current.n_bands()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
   1   0.0000000   0.0000000   0.0000000   2.00000  -10.50000   2.00000   -1.20000   0.00000    2.30000
   2   0.0500000   0.0000000   0.0000000   2.00000  -10.40000   1.00000   -0.90000   0.00000    2.10000
";

    #[test]
    fn test_parse_band_content() {
        let data = parse_band_content(SAMPLE, "band1001.out").unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.n_bands(), 3);
        assert_eq!(data.kpoints[1], [0.05, 0.0, 0.0]);
        assert_eq!(data.occupations[1], vec![2.0, 1.0, 0.0]);
        assert_eq!(data.eigenvalues[0], vec![-10.5, -1.2, 2.3]);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let content = "\n1 0.0 0.0\n   \n2 0.1 0.2 0.3 2.0 -1.0\n";
        let data = parse_band_content(content, "band1001.out").unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.kpoints[0], [0.1, 0.2, 0.3]);
        assert_eq!(data.eigenvalues.len(), 1);
        assert_eq!(data.occupations.len(), 1);
    }

    #[test]
    fn test_unpaired_trailing_column_dropped() {
        let content = "1 0.0 0.0 0.0 2.0 -1.0 0.0 1.5 0.7\n";
        let data = parse_band_content(content, "band1001.out").unwrap();
        assert_eq!(data.occupations[0], vec![2.0, 0.0]);
        assert_eq!(data.eigenvalues[0], vec![-1.0, 1.5]);
    }

    #[test]
    fn test_four_columns_gives_zero_bands() {
        let data = parse_band_content("7 0.1 0.2 0.3\n", "band1001.out").unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.n_bands(), 0);
    }

    #[test]
    fn test_invalid_number_is_error() {
        let content = "1 0.0 abc 0.0 2.0 -1.0\n";
        let err = parse_band_content(content, "band1001.out").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_ragged_rows_are_error() {
        let content = "1 0.0 0.0 0.0 2.0 -1.0 0.0 1.0\n2 0.1 0.0 0.0 2.0 -1.0\n";
        assert!(parse_band_content(content, "band1001.out").is_err());
    }

    #[test]
    fn test_select_files_sorted_and_variant() {
        let temp = TempDir::new().unwrap();
        for name in [
            "band1002.out",
            "band1001.out",
            "band1001.out.no_soc",
            "aims.out",
        ] {
            fs::write(temp.path().join(name), SAMPLE).unwrap();
        }

        let primary = select_band_files(temp.path(), BandVariant::Primary).unwrap();
        let names: Vec<_> = primary
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["band1001.out", "band1002.out"]);

        let no_soc = select_band_files(temp.path(), BandVariant::NoSoc).unwrap();
        assert_eq!(no_soc.len(), 1);
        assert!(detect_soc(temp.path()));
    }

    #[test]
    fn test_no_band_files_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(!detect_soc(temp.path()));
        let err = select_band_files(temp.path(), BandVariant::Primary).unwrap_err();
        assert!(matches!(err, AimskitError::NoFilesFound { .. }));
    }

    #[test]
    fn test_parse_band_files_concatenates_in_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("band1001.out"), SAMPLE).unwrap();
        fs::write(
            temp.path().join("band1002.out"),
            "1 0.5 0.5 0.0 2.0 -9.0 0.0 -0.5 0.0 3.0\n",
        )
        .unwrap();

        let (files, data) = parse_band_files(temp.path(), BandVariant::Primary).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(data.len(), 3);
        assert_eq!(data.kpoints[2], [0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_select_files_in_bracketed_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("run[1]");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("band1001.out"), SAMPLE).unwrap();
        fs::write(dir.join("band1001.out.no_soc"), SAMPLE).unwrap();

        let files = select_band_files(&dir, BandVariant::Primary).unwrap();
        assert_eq!(files, vec![dir.join("band1001.out")]);
        assert!(detect_soc(&dir));
    }

    #[test]
    fn test_parse_band_files_band_count_mismatch() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("band1001.out"), SAMPLE).unwrap();
        fs::write(temp.path().join("band1002.out"), "1 0.5 0.5 0.0 2.0 -9.0\n").unwrap();

        assert!(parse_band_files(temp.path(), BandVariant::Primary).is_err());
    }
}
