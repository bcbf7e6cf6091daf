//! # .grd 网格文件
//!
//! 单列数值文件：每行一个值，宽 16、8 位小数，无表头。
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 调用

use crate::error::{AimskitError, Result};

#[cfg(test)]
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 写出网格文件
pub fn save_grid_file(values: &[f64], output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| AimskitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    for value in values {
        writeln!(writer, "{:16.8}", value).map_err(write_err)?;
    }

    writer.flush().map_err(write_err)?;
    Ok(())
}

/// 读回网格文件（空行忽略）
#[cfg(test)]
pub fn read_grid_file(path: &Path) -> Result<Vec<f64>> {
    let content = fs::read_to_string(path).map_err(|e| AimskitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse::<f64>()
                .map_err(|e| AimskitError::ParseError {
                    format: "grd".to_string(),
                    path: path.display().to_string(),
                    reason: format!("Invalid value at line {}: {}", i + 1, e),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_grid_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("KX.grd");
        save_grid_file(&[0.0, -0.125, 12.5], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "      0.00000000\n     -0.12500000\n     12.50000000\n"
        );
    }

    #[test]
    fn test_grid_precision_on_reread() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("BAND_HOMO.grd");
        let values = vec![1.0 / 3.0, -2.718281828459045, 1e-9, 123.456789012345];

        save_grid_file(&values, &path).unwrap();
        let back = read_grid_file(&path).unwrap();

        assert_eq!(back.len(), values.len());
        for (a, b) in values.iter().zip(&back) {
            assert!((a - b).abs() <= 5e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_empty_grid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.grd");
        save_grid_file(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(read_grid_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_write_error_propagates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing_dir").join("KX.grd");
        let err = save_grid_file(&[1.0], &path).unwrap_err();
        assert!(matches!(err, AimskitError::FileWriteError { .. }));
    }
}
